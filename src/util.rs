//! Geometry helpers shared across the engine.
//!
//! This module provides:
//! - [`Rect`]: validated integer rectangle used for regions and patches
//! - Pointer clamping/normalization for raw event coordinates
//! - Arrowhead and ellipse geometry calculations

/// Axis-aligned rectangle with guaranteed positive dimensions.
///
/// All canvas geometry is expressed in canvas-local coordinates (origin at
/// the top-left of the captured region); the region selector uses the same
/// type in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Returns `None` unless both dimensions are positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from two opposite corners, normalizing any drag
    /// direction. Returns `None` for zero-area input.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Option<Self> {
        Self::new(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs())
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns the overlap of two rectangles, if any.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        Rect::from_min_max(
            self.x.max(other.x),
            self.y.max(other.y),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// Returns true if the point lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Clamps a point to lie within the rectangle (inclusive of the last
    /// pixel on each edge).
    pub fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x.clamp(self.x, self.right() - 1),
            y.clamp(self.y, self.bottom() - 1),
        )
    }
}

/// Normalizes a raw pointer coordinate into canvas bounds.
///
/// Backends occasionally deliver non-finite coordinates (tablet glitches,
/// synthetic events); those collapse to 0 before clamping so malformed
/// geometry never reaches the annotation list.
pub fn clamp_point(x: f64, y: f64, width: i32, height: i32) -> (i32, i32) {
    let sanitize = |v: f64, max: i32| -> i32 {
        if !v.is_finite() {
            return 0;
        }
        (v.round() as i64).clamp(0, i64::from(max.max(1) - 1)) as i32
    };
    (sanitize(x, width), sanitize(y, height))
}

/// Calculates arrowhead points for an arrow ending at (x2, y2).
///
/// Creates a V-shaped head at the end point, opening back towards the
/// start. The head length is capped at 30% of the shaft length so short
/// arrows keep a sensible silhouette.
///
/// Returns two points `[(left_x, left_y), (right_x, right_y)]`; for shafts
/// shorter than one pixel both equal the end point.
pub fn arrowhead_points(
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    length: f64,
    angle_degrees: f64,
) -> [(f64, f64); 2] {
    let dx = (x2 - x1) as f64;
    let dy = (y2 - y1) as f64;
    let shaft = (dx * dx + dy * dy).sqrt();

    if shaft < 1.0 {
        return [(x2 as f64, y2 as f64), (x2 as f64, y2 as f64)];
    }

    let ux = dx / shaft;
    let uy = dy / shaft;
    let head = length.min(shaft * 0.3);

    let angle = angle_degrees.to_radians();
    let cos_a = angle.cos();
    let sin_a = angle.sin();

    let left_x = x2 as f64 - head * (ux * cos_a - uy * sin_a);
    let left_y = y2 as f64 - head * (uy * cos_a + ux * sin_a);
    let right_x = x2 as f64 - head * (ux * cos_a + uy * sin_a);
    let right_y = y2 as f64 - head * (uy * cos_a - ux * sin_a);

    [(left_x, left_y), (right_x, right_y)]
}

/// Converts a drag rectangle (corner to corner) into ellipse parameters.
///
/// Returns `(cx, cy, rx, ry)`: the center point and the horizontal and
/// vertical radii.
pub fn ellipse_bounds(x1: i32, y1: i32, x2: i32, y2: i32) -> (i32, i32, i32, i32) {
    let cx = (x1 + x2) / 2;
    let cy = (y1 + y2) / 2;
    let rx = ((x2 - x1).abs()) / 2;
    let ry = ((y2 - y1).abs()) / 2;
    (cx, cy, rx, ry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_rejects_degenerate_dimensions() {
        assert!(Rect::new(0, 0, 0, 10).is_none());
        assert!(Rect::new(0, 0, 10, -1).is_none());
        assert!(Rect::from_corners(50, 50, 50, 50).is_none());
    }

    #[test]
    fn from_corners_normalizes_drag_direction() {
        let rect = Rect::from_corners(50, 40, 10, 90).unwrap();
        assert_eq!(rect, Rect::new(10, 40, 40, 50).unwrap());
    }

    #[test]
    fn intersect_clips_to_overlap() {
        let a = Rect::new(0, 0, 100, 100).unwrap();
        let b = Rect::new(60, -20, 100, 50).unwrap();
        assert_eq!(a.intersect(&b), Rect::new(60, 0, 40, 30));

        let c = Rect::new(200, 200, 10, 10).unwrap();
        assert!(a.intersect(&c).is_none());
    }

    #[test]
    fn clamp_point_handles_non_finite_input() {
        assert_eq!(clamp_point(f64::NAN, 5.0, 100, 100), (0, 5));
        assert_eq!(clamp_point(f64::INFINITY, -3.0, 100, 100), (99, 0));
        assert_eq!(clamp_point(42.4, 99.6, 100, 100), (42, 99));
    }

    #[test]
    fn arrowhead_caps_at_thirty_percent_of_shaft() {
        let [(lx, ly), _] = arrowhead_points(0, 10, 10, 10, 100.0, 30.0);
        let distance = ((10.0 - lx).powi(2) + (10.0 - ly).powi(2)).sqrt();
        assert!((distance - 3.0).abs() < 1e-9);
    }

    #[test]
    fn arrowhead_handles_degenerate_shaft() {
        let [(lx, ly), (rx, ry)] = arrowhead_points(5, 5, 5, 5, 15.0, 45.0);
        assert_eq!((lx, ly), (5.0, 5.0));
        assert_eq!((rx, ry), (5.0, 5.0));
    }

    #[test]
    fn ellipse_bounds_compute_center_and_radii() {
        let (cx, cy, rx, ry) = ellipse_bounds(0, 0, 10, 4);
        assert_eq!((cx, cy, rx, ry), (5, 2, 5, 2));
    }
}
