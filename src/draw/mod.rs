//! Drawing subsystem: annotation model, colors, fonts, and Cairo rendering.

pub mod annotation;
pub mod color;
pub mod font;
pub mod render;

pub use annotation::{Annotation, RedactionEffect};
pub use color::Color;
pub use font::FontDescriptor;
pub use render::{render_annotation, render_annotations};
