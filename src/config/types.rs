//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::draw::color::{self, Color, RED};

/// Color specification: either a named color or an RGB array.
///
/// Named colors: red, green, blue, yellow, orange, pink, white, black.
/// RGB arrays use 0-255 per channel, e.g. `[255, 128, 0]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Named(String),
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolves the spec to a concrete color. Unknown names fall back to
    /// red with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Named(name) => color::name_to_color(name).unwrap_or_else(|| {
                log::warn!("Unknown color name '{name}', falling back to red");
                RED
            }),
            ColorSpec::Rgb([r, g, b]) => Color::new(
                f64::from(*r) / 255.0,
                f64::from(*g) / 255.0,
                f64::from(*b) / 255.0,
                1.0,
            ),
        }
    }
}

/// Drawing tool defaults.
///
/// Controls which tool and appearance a new session starts with. The host
/// toolbar can change all of these at runtime.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Tool selected when a session opens (pencil, marker, line, arrow,
    /// rect, ellipse, counter, text, pixelate, blur)
    #[serde(default = "default_tool")]
    pub default_tool: String,

    /// Default stroke color - a named color or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke thickness in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_thickness")]
    pub default_thickness: f64,

    /// Default font size for the text tool in points (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,

    /// Font family name for text rendering (e.g., "Sans", "Monospace")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", or a numeric value 100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: default_tool(),
            default_color: default_color(),
            default_thickness: default_thickness(),
            default_font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
        }
    }
}

/// Arrow tool settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArrowConfig {
    /// Arrowhead length in pixels (valid range: 5.0 - 50.0)
    #[serde(default = "default_arrow_length")]
    pub length: f64,

    /// Arrowhead angle in degrees (valid range: 15.0 - 60.0)
    #[serde(default = "default_arrow_angle")]
    pub angle_degrees: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            length: default_arrow_length(),
            angle_degrees: default_arrow_angle(),
        }
    }
}

/// Undo history settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of undoable actions; 0 means unbounded
    #[serde(default)]
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_depth: 0 }
    }
}

/// Redaction tool settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct RedactConfig {
    /// Smallest allowed pixelate block edge in pixels (valid range: 1 - 64)
    #[serde(default = "default_min_block_size")]
    pub min_block_size: i32,
}

impl Default for RedactConfig {
    fn default() -> Self {
        Self {
            min_block_size: default_min_block_size(),
        }
    }
}

/// Export settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for saved captures; defaults to the XDG pictures
    /// directory (falling back to the home directory)
    #[serde(default)]
    pub save_directory: Option<String>,

    /// chrono strftime template for generated filenames, without extension
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Image format for saved files ("png" or "jpeg")
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_directory: None,
            filename_template: default_filename_template(),
            format: default_format(),
        }
    }
}

/// Keyboard shortcut assignments.
///
/// Each binding is a string like "Ctrl+S" or "Escape". Modifiers are
/// separated by '+'; recognized modifiers are Ctrl, Shift, and Alt.
#[derive(Debug, Serialize, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_save_binding")]
    pub save: String,

    #[serde(default = "default_copy_binding")]
    pub copy: String,

    #[serde(default = "default_undo_binding")]
    pub undo: String,

    #[serde(default = "default_redo_binding")]
    pub redo: String,

    #[serde(default = "default_cancel_binding")]
    pub cancel: String,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            save: default_save_binding(),
            copy: default_copy_binding(),
            undo: default_undo_binding(),
            redo: default_redo_binding(),
            cancel: default_cancel_binding(),
        }
    }
}

fn default_tool() -> String {
    "pencil".to_string()
}

fn default_color() -> ColorSpec {
    ColorSpec::Named("red".to_string())
}

fn default_thickness() -> f64 {
    3.0
}

fn default_font_size() -> f64 {
    18.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_arrow_length() -> f64 {
    15.0
}

fn default_arrow_angle() -> f64 {
    30.0
}

fn default_min_block_size() -> i32 {
    3
}

fn default_filename_template() -> String {
    "snipmark_%Y-%m-%d_%H-%M-%S".to_string()
}

fn default_format() -> String {
    "png".to_string()
}

fn default_save_binding() -> String {
    "Ctrl+S".to_string()
}

fn default_copy_binding() -> String {
    "Ctrl+C".to_string()
}

fn default_undo_binding() -> String {
    "Ctrl+Z".to_string()
}

fn default_redo_binding() -> String {
    "Ctrl+Y".to_string()
}

fn default_cancel_binding() -> String {
    "Escape".to_string()
}
