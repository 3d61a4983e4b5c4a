//! Annotation data model.
//!
//! Every mark a user can place on a capture is one variant of
//! [`Annotation`]. Vector variants store geometry and style and are
//! rasterized on every render; redactions store their pixel output once,
//! at creation time, so the hidden content never has to be recomputed
//! from (or retained alongside) later canvas states.

use crate::draw::color::Color;
use crate::draw::font::FontDescriptor;
use crate::image::{Patch, Pixmap};
use crate::util::Rect;

/// A single committed mark on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Freehand pen stroke through the recorded points.
    Stroke {
        points: Vec<(i32, i32)>,
        color: Color,
        thickness: f64,
    },

    /// Freehand highlighter stroke. Rendered wider than the pen and at a
    /// fixed translucency regardless of the stored color's alpha.
    Marker {
        points: Vec<(i32, i32)>,
        color: Color,
        thickness: f64,
    },

    /// Straight line between two points.
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        thickness: f64,
    },

    /// Line with a V-shaped head at the end point.
    Arrow {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        thickness: f64,
        /// Length of each head barb in pixels.
        head_length: f64,
        /// Angle between the shaft and each barb, in degrees.
        head_angle: f64,
    },

    /// Axis-aligned rectangle outline.
    Rect {
        rect: Rect,
        color: Color,
        thickness: f64,
    },

    /// Ellipse outline inscribed in a drag rectangle.
    Ellipse {
        cx: i32,
        cy: i32,
        rx: i32,
        ry: i32,
        color: Color,
        thickness: f64,
    },

    /// Numbered circular badge for step-by-step callouts.
    CounterBubble {
        x: i32,
        y: i32,
        number: u32,
        color: Color,
        radius: f64,
        font: FontDescriptor,
    },

    /// Text placed at a point.
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Color,
        size: f64,
        font: FontDescriptor,
    },

    /// An obscured region. The patch holds the already-transformed pixels;
    /// compositing pastes it verbatim.
    Redaction {
        rect: Rect,
        patch: Pixmap,
        effect: RedactionEffect,
    },
}

/// Which transform produced a redaction patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedactionEffect {
    Pixelate { block_size: i32 },
    Blur { radius: i32 },
}

impl Annotation {
    /// Returns true if compositing this annotation writes raw pixels
    /// instead of going through the vector rasterizer.
    pub fn is_redaction(&self) -> bool {
        matches!(self, Annotation::Redaction { .. })
    }

    /// The pixel patch for a redaction, positioned on the canvas.
    pub fn redaction_patch(&self) -> Option<Patch> {
        match self {
            Annotation::Redaction { rect, patch, .. } => Some(Patch {
                x: rect.x,
                y: rect.y,
                pixels: patch.clone(),
            }),
            _ => None,
        }
    }
}
