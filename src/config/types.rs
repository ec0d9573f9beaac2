//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::{BLACK, FontDescriptor, WHITE};
use crate::input::tool::BrushConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Brush defaults applied when the canvas opens.
///
/// Users change these at runtime through the controls surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default brush color - a named color, `#rrggbb`, or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default brush size in pixels (valid range: 1 - 50)
    #[serde(default = "default_size")]
    pub default_size: u32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_size: default_size(),
        }
    }
}

impl DrawingConfig {
    /// Builds the initial brush.
    pub fn brush(&self) -> BrushConfig {
        BrushConfig::new(self.default_size, self.default_color.to_color_or(BLACK))
    }
}

/// Canvas geometry and background.
///
/// The backing store size is picked once from the viewport width: narrower
/// than `breakpoint` uses `narrow_size`, otherwise `wide_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Background color painted by the eraser and used to flatten exports
    #[serde(default = "default_background")]
    pub background_color: ColorSpec,

    /// Backing store size `[width, height]` for narrow viewports
    #[serde(default = "default_narrow_size")]
    pub narrow_size: [u32; 2],

    /// Backing store size `[width, height]` for wide viewports
    #[serde(default = "default_wide_size")]
    pub wide_size: [u32; 2],

    /// Viewport width in CSS pixels at which the wide size applies
    #[serde(default = "default_breakpoint")]
    pub breakpoint: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background_color: default_background(),
            narrow_size: default_narrow_size(),
            wide_size: default_wide_size(),
            breakpoint: default_breakpoint(),
        }
    }
}

impl CanvasConfig {
    /// Backing store dimensions for a viewport of the given width.
    pub fn dimensions_for_viewport(&self, viewport_width: u32) -> (u32, u32) {
        let [width, height] = if viewport_width < self.breakpoint {
            self.narrow_size
        } else {
            self.wide_size
        };
        (width, height)
    }
}

/// Text tool font settings.
///
/// The font size is not configurable: text is drawn at twice the brush size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TextConfig {
    /// Font family name (e.g., "Sans", "Arial", "DejaVu Serif")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", or 100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
        }
    }
}

impl TextConfig {
    pub fn font_descriptor(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.font_family.clone(),
            self.font_weight.clone(),
            self.font_style.clone(),
        )
    }
}

/// Export destination settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory exported images are written to (`~` is expanded)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Fixed file name of the exported image
    #[serde(default = "default_filename")]
    pub filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename: default_filename(),
        }
    }
}

/// User-facing alert settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NotificationConfig {
    /// Show alerts as desktop notifications (they are always logged)
    #[serde(default = "default_notifications_enabled")]
    pub enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_notifications_enabled(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("#000000".to_string())
}

fn default_size() -> u32 {
    5
}

fn default_background() -> ColorSpec {
    ColorSpec::from(WHITE)
}

fn default_narrow_size() -> [u32; 2] {
    [340, 520]
}

fn default_wide_size() -> [u32; 2] {
    [1000, 500]
}

fn default_breakpoint() -> u32 {
    768
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

fn default_save_directory() -> String {
    "~/Pictures/Paintpad".to_string()
}

fn default_filename() -> String {
    "my-painting.png".to_string()
}

fn default_notifications_enabled() -> bool {
    true
}
