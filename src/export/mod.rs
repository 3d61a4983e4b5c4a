//! Exporting flattened captures: file saving and clipboard.
//!
//! This is the one fire-and-forget boundary of the engine. Callers hand in
//! an immutable flattened [`Pixmap`]; failures surface as [`ExportError`]
//! and leave the session untouched, so a retry is always safe.

pub mod clipboard;

pub use clipboard::copy_to_clipboard;

use chrono::Local;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::OutputConfig;
use crate::image::Pixmap;

/// Errors from the export boundary.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("clipboard error: {0}")]
    Clipboard(String),
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Parses a format name from config ("png", "jpeg", "jpg").
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpeg" | "jpg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Encodes a pixmap to PNG bytes (also the clipboard wire format).
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, ExportError> {
    let surface = pixmap
        .to_image_surface()
        .map_err(|e| ExportError::Encode(format!("cairo surface: {e}")))?;
    let mut bytes = Vec::new();
    surface
        .write_to_png(&mut bytes)
        .map_err(|e| ExportError::Encode(format!("PNG encoding: {e}")))?;
    Ok(bytes)
}

/// Encodes a pixmap to JPEG bytes. Alpha is dropped; captures are opaque.
pub fn encode_jpeg(pixmap: &Pixmap) -> Result<Vec<u8>, ExportError> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..pixmap.height() {
        for x in 0..pixmap.width() {
            let argb = pixmap.pixel(x, y);
            rgb.push(((argb >> 16) & 0xff) as u8);
            rgb.push(((argb >> 8) & 0xff) as u8);
            rgb.push((argb & 0xff) as u8);
        }
    }

    let buffer = image::RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| ExportError::Encode("RGB buffer size mismatch".to_string()))?;
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
        .map_err(|e| ExportError::Encode(format!("JPEG encoding: {e}")))?;
    Ok(bytes)
}

/// Saves a pixmap to the given path in the given format.
pub fn save_image(pixmap: &Pixmap, path: &Path, format: ImageFormat) -> Result<(), ExportError> {
    let bytes = match format {
        ImageFormat::Png => encode_png(pixmap)?,
        ImageFormat::Jpeg => encode_jpeg(pixmap)?,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        log::info!("Creating output directory: {}", parent.display());
        fs::create_dir_all(parent)?;
    }

    fs::write(path, &bytes)?;
    log::info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Generates a filename from the configured chrono template.
pub fn generate_filename(template: &str, format: ImageFormat) -> String {
    let now = Local::now();
    format!("{}.{}", now.format(template), format.extension())
}

/// Resolves the configured save directory, defaulting to the pictures
/// directory (or home) when unset. Expands a leading `~/`.
pub fn resolve_save_directory(output: &OutputConfig) -> PathBuf {
    match &output.save_directory {
        Some(dir) => expand_tilde(dir),
        None => dirs::picture_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("snipmark"),
    }
}

/// Saves a pixmap under the configured directory with a timestamped name.
/// Returns the path written.
pub fn save_to_default(pixmap: &Pixmap, output: &OutputConfig) -> Result<PathBuf, ExportError> {
    let format = ImageFormat::from_name(&output.format).unwrap_or(ImageFormat::Png);
    let directory = resolve_save_directory(output);
    let path = directory.join(generate_filename(&output.filename_template, format));
    save_image(pixmap, &path, format)?;
    Ok(path)
}

/// Expands a leading tilde in a configured path.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
