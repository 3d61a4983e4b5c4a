//! Annotation tools and the in-flight gesture state machine.

pub mod gesture;

pub use gesture::Gesture;

use crate::draw::{Color, FontDescriptor};

/// Counter bubble radius is derived from the configured line thickness.
pub const COUNTER_RADIUS_SCALE: f64 = 10.0;

/// The available annotation tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Pencil,
    Marker,
    Line,
    Arrow,
    Rect,
    Ellipse,
    Counter,
    Text,
    Pixelate,
    Blur,
}

impl ToolKind {
    /// Parses a tool name as it appears in the config file. Matching is
    /// case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "pencil" | "pen" => Some(Self::Pencil),
            "marker" => Some(Self::Marker),
            "line" => Some(Self::Line),
            "arrow" => Some(Self::Arrow),
            "rect" | "rectangle" => Some(Self::Rect),
            "ellipse" | "circle" => Some(Self::Ellipse),
            "counter" => Some(Self::Counter),
            "text" => Some(Self::Text),
            "pixelate" => Some(Self::Pixelate),
            "blur" => Some(Self::Blur),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pencil => "pencil",
            Self::Marker => "marker",
            Self::Line => "line",
            Self::Arrow => "arrow",
            Self::Rect => "rect",
            Self::Ellipse => "ellipse",
            Self::Counter => "counter",
            Self::Text => "text",
            Self::Pixelate => "pixelate",
            Self::Blur => "blur",
        }
    }

    /// Freehand tools accumulate a point trail while dragging.
    pub fn is_freehand(&self) -> bool {
        matches!(self, Self::Pencil | Self::Marker)
    }

    /// Redaction tools produce a pixel patch instead of vector geometry.
    pub fn is_redaction(&self) -> bool {
        matches!(self, Self::Pixelate | Self::Blur)
    }

    /// Counter bubbles commit on the initial press; there is no drag phase.
    pub fn commits_on_press(&self) -> bool {
        matches!(self, Self::Counter)
    }

    /// Text enters a typing phase instead of a drag gesture.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

/// Style parameters captured when a gesture begins.
///
/// Toolbar changes made while a gesture is in flight must not affect it,
/// so the gesture keeps its own copy of everything style-related.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolStyle {
    pub color: Color,
    pub thickness: f64,
    pub font_size: f64,
    pub font: FontDescriptor,
    pub arrow_length: f64,
    pub arrow_angle: f64,
    /// Smallest pixelate block the config allows.
    pub min_block_size: i32,
}

impl ToolStyle {
    /// Pixelate block edge in pixels, derived from the stroke thickness
    /// but never below the configured floor.
    pub fn pixelate_block_size(&self) -> i32 {
        (self.thickness.round() as i32).max(self.min_block_size).max(1)
    }

    /// Box blur radius derived from the stroke thickness.
    pub fn blur_radius(&self) -> i32 {
        (self.thickness.round() as i32).max(1)
    }

    /// Counter bubble radius for this style.
    pub fn counter_radius(&self) -> f64 {
        (self.thickness * COUNTER_RADIUS_SCALE).max(4.0)
    }
}
