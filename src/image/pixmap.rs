//! Owned pixel buffer shared between the pixel transforms and the Cairo
//! rendering pipeline.

use crate::draw::Color;
use crate::util::Rect;

/// Owned pixel buffer in Cairo's `ARgb32` layout (packed native-endian
/// `0xAARRGGBB`, premultiplied alpha, stride = width * 4).
///
/// Screen captures are fully opaque, so premultiplication is the identity
/// for every buffer the engine produces. Cloning performs a deep copy,
/// which the composition engine relies on for snapshot semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: i32,
    height: i32,
    data: Vec<u8>,
}

impl Pixmap {
    /// Creates a transparent-black pixmap. Dimensions are clamped to at
    /// least 1x1; degenerate sizes are a caller bug but must not panic.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Creates a pixmap filled with a single color.
    pub fn solid(width: i32, height: i32, color: Color) -> Self {
        let mut pixmap = Self::new(width, height);
        pixmap.fill(color);
        pixmap
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Full-buffer rectangle in local coordinates.
    pub fn bounds(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        }
    }

    /// Raw pixel bytes. Byte-for-byte comparison of two renders is the
    /// equality the composition tests rely on.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: i32, y: i32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Reads the packed ARGB value at (x, y). Out-of-bounds reads return 0.
    pub fn pixel(&self, x: i32, y: i32) -> u32 {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return 0;
        }
        let i = self.index(x, y);
        u32::from_ne_bytes([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Writes a packed ARGB value at (x, y). Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, argb: u32) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&argb.to_ne_bytes());
    }

    /// Fills the whole buffer with one color.
    pub fn fill(&mut self, color: Color) {
        let bytes = pack_color(color).to_ne_bytes();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Copies out the given sub-rectangle, clamped to the buffer bounds.
    /// A rectangle entirely outside the buffer yields a 1x1 pixmap.
    pub fn crop(&self, rect: Rect) -> Pixmap {
        let Some(clipped) = rect.intersect(&self.bounds()) else {
            return Pixmap::new(1, 1);
        };
        let mut out = Pixmap::new(clipped.width, clipped.height);
        for row in 0..clipped.height {
            let src_start = self.index(clipped.x, clipped.y + row);
            let src_end = src_start + (clipped.width as usize) * 4;
            let dst_start = out.index(0, row);
            let dst_end = dst_start + (clipped.width as usize) * 4;
            out.data[dst_start..dst_end].copy_from_slice(&self.data[src_start..src_end]);
        }
        out
    }

    /// Pastes `src` with its top-left corner at (x, y), clipping to bounds.
    /// The source replaces destination pixels (no blending); patches are
    /// opaque by construction.
    pub fn blit(&mut self, x: i32, y: i32, src: &Pixmap) {
        let Some(dst_rect) = (Rect {
            x,
            y,
            width: src.width,
            height: src.height,
        })
        .intersect(&self.bounds()) else {
            return;
        };

        for row in 0..dst_rect.height {
            let src_x = dst_rect.x - x;
            let src_y = dst_rect.y - y + row;
            let src_start = src.index(src_x, src_y);
            let src_end = src_start + (dst_rect.width as usize) * 4;
            let dst_start = self.index(dst_rect.x, dst_rect.y + row);
            let dst_end = dst_start + (dst_rect.width as usize) * 4;
            self.data[dst_start..dst_end].copy_from_slice(&src.data[src_start..src_end]);
        }
    }

    /// Runs Cairo drawing operations against this buffer.
    ///
    /// The buffer is copied into an image surface, the closure draws, and
    /// the result is copied back. Surface creation can only fail on
    /// degenerate dimensions or allocation failure; in that case the
    /// buffer is left untouched and the failure is logged, matching the
    /// engine's clamp-don't-propagate policy for internal drawing errors.
    pub fn with_cairo(&mut self, f: impl FnOnce(&cairo::Context)) {
        let mut surface = match self.to_image_surface() {
            Ok(surface) => surface,
            Err(err) => {
                log::error!("Failed to create cairo surface: {err}");
                return;
            }
        };

        {
            let ctx = match cairo::Context::new(&surface) {
                Ok(ctx) => ctx,
                Err(err) => {
                    log::error!("Failed to create cairo context: {err}");
                    return;
                }
            };
            f(&ctx);
        }

        surface.flush();
        self.read_back(&mut surface);
    }

    /// Copies this buffer into a standalone Cairo image surface.
    pub fn to_image_surface(&self) -> Result<cairo::ImageSurface, cairo::Error> {
        let mut surface =
            cairo::ImageSurface::create(cairo::Format::ARgb32, self.width, self.height)?;
        let stride = surface.stride() as usize;
        {
            let mut data = surface
                .data()
                .map_err(|_| cairo::Error::SurfaceTypeMismatch)?;
            let row_bytes = (self.width as usize) * 4;
            for row in 0..self.height as usize {
                let src_start = row * row_bytes;
                let dst_start = row * stride;
                data[dst_start..dst_start + row_bytes]
                    .copy_from_slice(&self.data[src_start..src_start + row_bytes]);
            }
        }
        surface.mark_dirty();
        Ok(surface)
    }

    fn read_back(&mut self, surface: &mut cairo::ImageSurface) {
        let stride = surface.stride() as usize;
        let Ok(data) = surface.data() else {
            log::error!("Cairo surface data unavailable after rendering");
            return;
        };
        let row_bytes = (self.width as usize) * 4;
        for row in 0..self.height as usize {
            let src_start = row * stride;
            let dst_start = row * row_bytes;
            self.data[dst_start..dst_start + row_bytes]
                .copy_from_slice(&data[src_start..src_start + row_bytes]);
        }
    }
}

/// Packs a floating-point color into premultiplied ARGB.
pub fn pack_color(color: Color) -> u32 {
    let a = color.a.clamp(0.0, 1.0);
    let to_channel = |v: f64| -> u32 { ((v.clamp(0.0, 1.0) * a) * 255.0).round() as u32 };
    let alpha = (a * 255.0).round() as u32;
    (alpha << 24) | (to_channel(color.r) << 16) | (to_channel(color.g) << 8) | to_channel(color.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};

    #[test]
    fn pack_color_is_premultiplied_argb() {
        assert_eq!(pack_color(RED), 0xFFFF_0000);
        assert_eq!(pack_color(BLUE.with_alpha(0.0)), 0x0000_0000);
    }

    #[test]
    fn solid_fill_sets_every_pixel() {
        let pixmap = Pixmap::solid(4, 3, RED);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(pixmap.pixel(x, y), 0xFFFF_0000);
            }
        }
    }

    #[test]
    fn crop_extracts_sub_rectangle() {
        let mut pixmap = Pixmap::solid(10, 10, RED);
        pixmap.set_pixel(5, 5, pack_color(BLUE));

        let cropped = pixmap.crop(Rect::new(4, 4, 3, 3).unwrap());
        assert_eq!(cropped.width(), 3);
        assert_eq!(cropped.height(), 3);
        assert_eq!(cropped.pixel(1, 1), pack_color(BLUE));
        assert_eq!(cropped.pixel(0, 0), pack_color(RED));
    }

    #[test]
    fn crop_clips_to_bounds() {
        let pixmap = Pixmap::solid(10, 10, RED);
        let cropped = pixmap.crop(Rect::new(8, 8, 10, 10).unwrap());
        assert_eq!((cropped.width(), cropped.height()), (2, 2));
    }

    #[test]
    fn blit_replaces_destination_pixels() {
        let mut dst = Pixmap::solid(10, 10, RED);
        let patch = Pixmap::solid(4, 4, BLUE);

        dst.blit(8, 8, &patch); // clipped paste
        assert_eq!(dst.pixel(9, 9), pack_color(BLUE));
        assert_eq!(dst.pixel(7, 7), pack_color(RED));
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut pixmap = Pixmap::solid(4, 4, RED);
        pixmap.set_pixel(-1, 2, 0);
        pixmap.set_pixel(4, 0, 0);
        assert_eq!(pixmap.pixel(-1, 2), 0);
        assert_eq!(pixmap.pixel(0, 0), pack_color(RED));
    }
}
