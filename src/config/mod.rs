//! Configuration file support for snipmark.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/snipmark/config.toml`.
//! Settings include drawing defaults, arrow appearance, undo history,
//! redaction, export, and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

pub use types::{
    ArrowConfig, ColorSpec, DrawingConfig, HistoryConfig, KeybindingsConfig, OutputConfig,
    RedactConfig,
};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::draw::{Color, FontDescriptor};
use crate::tools::{ToolKind, ToolStyle};

/// Main configuration structure containing all user settings.
///
/// This is the root type deserialized from the TOML file. All fields have
/// defaults and missing sections simply use them.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_tool = "arrow"
/// default_color = "red"
/// default_thickness = 3.0
///
/// [arrow]
/// length = 15.0
/// angle_degrees = 30.0
///
/// [output]
/// format = "png"
/// filename_template = "snipmark_%Y-%m-%d_%H-%M-%S"
///
/// [keybindings]
/// save = "Ctrl+S"
/// undo = "Ctrl+Z"
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Drawing tool defaults (tool, color, thickness, font)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Arrow appearance settings
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Undo history settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Redaction tool settings
    #[serde(default)]
    pub redact: RedactConfig,

    /// Export settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Keyboard shortcut assignments
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning
    /// is logged; loading never fails on out-of-range numbers.
    ///
    /// Validated ranges:
    /// - `default_thickness`: 1.0 - 20.0
    /// - `default_font_size`: 8.0 - 72.0
    /// - `arrow.length`: 5.0 - 50.0
    /// - `arrow.angle_degrees`: 15.0 - 60.0
    /// - `redact.min_block_size`: 1 - 64
    pub fn validate_and_clamp(&mut self) {
        if ToolKind::from_name(&self.drawing.default_tool).is_none() {
            log::warn!(
                "Invalid default_tool '{}', falling back to 'pencil'",
                self.drawing.default_tool
            );
            self.drawing.default_tool = "pencil".to_string();
        }

        if !(1.0..=20.0).contains(&self.drawing.default_thickness) {
            log::warn!(
                "Invalid default_thickness {:.1}, clamping to 1.0-20.0 range",
                self.drawing.default_thickness
            );
            self.drawing.default_thickness = self.drawing.default_thickness.clamp(1.0, 20.0);
        }

        if !(8.0..=72.0).contains(&self.drawing.default_font_size) {
            log::warn!(
                "Invalid default_font_size {:.1}, clamping to 8.0-72.0 range",
                self.drawing.default_font_size
            );
            self.drawing.default_font_size = self.drawing.default_font_size.clamp(8.0, 72.0);
        }

        if !(5.0..=50.0).contains(&self.arrow.length) {
            log::warn!(
                "Invalid arrow length {:.1}, clamping to 5.0-50.0 range",
                self.arrow.length
            );
            self.arrow.length = self.arrow.length.clamp(5.0, 50.0);
        }

        if !(15.0..=60.0).contains(&self.arrow.angle_degrees) {
            log::warn!(
                "Invalid arrow angle {:.1}°, clamping to 15.0-60.0° range",
                self.arrow.angle_degrees
            );
            self.arrow.angle_degrees = self.arrow.angle_degrees.clamp(15.0, 60.0);
        }

        if !(1..=64).contains(&self.redact.min_block_size) {
            log::warn!(
                "Invalid min_block_size {}, clamping to 1-64 range",
                self.redact.min_block_size
            );
            self.redact.min_block_size = self.redact.min_block_size.clamp(1, 64);
        }

        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "normal".to_string();
        }

        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }

        if !matches!(
            self.output.format.to_lowercase().as_str(),
            "png" | "jpeg" | "jpg"
        ) {
            log::warn!(
                "Invalid output format '{}', falling back to 'png'",
                self.output.format
            );
            self.output.format = "png".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/snipmark/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    /// (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("snipmark");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// The tool a fresh session starts with.
    pub fn default_tool(&self) -> ToolKind {
        ToolKind::from_name(&self.drawing.default_tool).unwrap_or(ToolKind::Pencil)
    }

    /// The resolved default stroke color.
    pub fn default_color(&self) -> Color {
        self.drawing.default_color.to_color()
    }

    /// The configured font, as a descriptor for the rendering pipeline.
    pub fn font(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.drawing.font_family.clone(),
            self.drawing.font_weight.clone(),
            self.drawing.font_style.clone(),
        )
    }

    /// Snapshot of the configured style, as handed to a starting gesture.
    pub fn tool_style(&self) -> ToolStyle {
        ToolStyle {
            color: self.default_color(),
            thickness: self.drawing.default_thickness,
            font_size: self.drawing.default_font_size,
            font: self.font(),
            arrow_length: self.arrow.length,
            arrow_angle: self.arrow.angle_degrees,
            min_block_size: self.redact.min_block_size,
        }
    }
}
