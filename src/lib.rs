//! snipmark: screenshot capture and annotation engine.
//!
//! The engine covers everything between "the user wants a region of the
//! screen" and "an annotated image left the process": region selection,
//! drawing tools with live preview, layered composition with undo/redo,
//! pixel-level redaction, and export to file or clipboard. Screen capture
//! itself is delegated to a [`selector::CaptureProvider`]; the host event
//! loop feeds pointer and key events into a [`session::CaptureSession`]
//! and displays the frames it renders.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod export;
pub mod image;
pub mod selector;
pub mod session;
pub mod tools;
pub mod util;
