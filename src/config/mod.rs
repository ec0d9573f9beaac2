//! Configuration file support for paintpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/paintpad/config.toml`. Settings include brush defaults,
//! canvas geometry, the text font, the export destination and alert preferences.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CanvasConfig, DrawingConfig, ExportConfig, NotificationConfig, TextConfig};

use crate::input::tool::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [brush]
/// default_color = "#000000"
/// default_size = 5
///
/// [canvas]
/// background_color = "white"
/// narrow_size = [340, 520]
/// wide_size = [1000, 500]
/// breakpoint = 768
///
/// [text]
/// font_family = "Sans"
///
/// [export]
/// save_directory = "~/Pictures/Paintpad"
/// filename = "my-painting.png"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Brush defaults (color, size)
    #[serde(default)]
    pub brush: DrawingConfig,

    /// Canvas geometry and background color
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Text tool font
    #[serde(default)]
    pub text: TextConfig,

    /// Export destination
    #[serde(default)]
    pub export: ExportConfig,

    /// User-facing alert settings
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by the
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `brush.default_size`: 1 - 50
    /// - canvas sizes: 1 - 16384 per side
    /// - `canvas.breakpoint`: at least 1
    /// - `export.filename`: non-empty, no path separators
    pub fn validate_and_clamp(&mut self) {
        if !(MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).contains(&self.brush.default_size) {
            warn!(
                "Invalid brush default_size {}, clamping to {}-{} range",
                self.brush.default_size, MIN_BRUSH_SIZE, MAX_BRUSH_SIZE
            );
            self.brush.default_size = self
                .brush
                .default_size
                .clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        }

        if self.brush.default_color.try_to_color().is_none() {
            warn!(
                "Invalid brush default_color {:?}, falling back to black",
                self.brush.default_color
            );
            self.brush.default_color = DrawingConfig::default().default_color;
        }

        if self.canvas.background_color.try_to_color().is_none() {
            warn!(
                "Invalid canvas background_color {:?}, falling back to white",
                self.canvas.background_color
            );
            self.canvas.background_color = CanvasConfig::default().background_color;
        }

        for (name, size) in [
            ("narrow_size", &mut self.canvas.narrow_size),
            ("wide_size", &mut self.canvas.wide_size),
        ] {
            for side in size.iter_mut() {
                if !(1..=16384).contains(side) {
                    warn!("Invalid canvas {} side {}, clamping to 1-16384", name, side);
                    *side = (*side).clamp(1, 16384);
                }
            }
        }

        if self.canvas.breakpoint == 0 {
            warn!("Invalid canvas breakpoint 0, falling back to 768");
            self.canvas.breakpoint = CanvasConfig::default().breakpoint;
        }

        if !matches!(
            self.text.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.text.font_style
            );
            self.text.font_style = "normal".to_string();
        }

        let valid_weight = matches!(
            self.text.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .text
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));
        if !valid_weight {
            warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.text.font_weight
            );
            self.text.font_weight = "normal".to_string();
        }

        let filename = self.export.filename.trim();
        if filename.is_empty() || filename.contains('/') || filename.contains('\\') {
            warn!(
                "Invalid export filename '{}', falling back to 'my-painting.png'",
                self.export.filename
            );
            self.export.filename = ExportConfig::default().filename;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/paintpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("paintpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
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

        Self::load_from_path(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Writes this configuration as TOML to `config_path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Creates a default configuration file at the standard location.
    ///
    /// # Errors
    /// Returns an error if a config file already exists or cannot be written.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        Self::default().save_to_path(&config_path)?;
        Ok(config_path)
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, WHITE};
    use tempfile::TempDir;

    #[test]
    fn defaults_match_reference_canvas() {
        let config = Config::default();
        assert_eq!(config.brush.default_size, 5);
        assert_eq!(config.brush.brush().color, BLACK);
        assert_eq!(config.canvas.background_color.to_color(), WHITE);
        assert_eq!(config.canvas.dimensions_for_viewport(375), (340, 520));
        assert_eq!(config.canvas.dimensions_for_viewport(768), (1000, 500));
        assert_eq!(config.export.filename, "my-painting.png");
    }

    #[test]
    fn partial_file_uses_defaults_for_missing_sections() {
        let config: Config = toml::from_str("[brush]\ndefault_size = 12\n").unwrap();
        assert_eq!(config.brush.default_size, 12);
        assert_eq!(config.canvas, CanvasConfig::default());
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.brush.default_size = 99;
        config.brush.default_color = ColorSpec::Name("nope".into());
        config.canvas.narrow_size = [0, 520];
        config.canvas.breakpoint = 0;
        config.text.font_style = "wavy".into();
        config.text.font_weight = "1200".into();
        config.export.filename = "../escape.png".into();

        config.validate_and_clamp();

        assert_eq!(config.brush.default_size, 50);
        assert_eq!(config.brush.brush().color, BLACK);
        assert_eq!(config.canvas.narrow_size, [1, 520]);
        assert_eq!(config.canvas.breakpoint, 768);
        assert_eq!(config.text.font_style, "normal");
        assert_eq!(config.text.font_weight, "normal");
        assert_eq!(config.export.filename, "my-painting.png");
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.brush.default_size = 9;
        config.canvas.background_color = ColorSpec::Rgb([10, 20, 30]);

        config.save_to_path(&path).unwrap();
        let loaded = Config::load_from_path(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[brush\n").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn schema_describes_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema.get("properties").unwrap();
        assert!(properties.get("brush").is_some());
        assert!(properties.get("canvas").is_some());
    }
}
