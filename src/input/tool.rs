//! Drawing tool selection and brush parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::draw::Color;

/// Smallest brush size in pixels.
pub const MIN_BRUSH_SIZE: u32 = 1;
/// Largest brush size in pixels.
pub const MAX_BRUSH_SIZE: u32 = 50;

/// Drawing tool selection.
///
/// Exactly one tool is active at a time; it is stored as a single value so
/// "no tool" or "two tools" cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Freehand painting with the brush color (default)
    #[default]
    Brush,
    /// Freehand painting with the canvas background color
    Eraser,
    /// Double-click places a text overlay; pointer strokes are suppressed
    Text,
}

impl Tool {
    /// Whether pointer strokes paint the background color.
    pub fn is_erasing(self) -> bool {
        self == Tool::Eraser
    }

    /// Whether pointer strokes are drawn at all.
    pub fn draws_strokes(self) -> bool {
        self != Tool::Text
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tool::Brush => "brush",
            Tool::Eraser => "eraser",
            Tool::Text => "text",
        };
        f.write_str(label)
    }
}

/// Brush size and color shared by all tools.
///
/// The eraser reuses `size`; text is drawn at `2 × size` pixels in `color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushConfig {
    /// Line width in pixels, 1–50
    pub size: u32,
    /// Opaque paint color
    pub color: Color,
}

impl BrushConfig {
    /// Creates a brush, clamping the size into range and forcing opacity.
    pub fn new(size: u32, color: Color) -> Self {
        Self {
            size: clamp_brush_size(size),
            color: color.opaque(),
        }
    }

    /// Pixel size used for committed text.
    pub fn text_pixel_size(&self) -> f64 {
        (self.size * 2) as f64
    }
}

/// Clamps a requested brush size into the 1–50 range, logging adjustments.
pub fn clamp_brush_size(size: u32) -> u32 {
    let clamped = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    if clamped != size {
        log::warn!(
            "Brush size {} out of range, clamping to {}-{}",
            size,
            MIN_BRUSH_SIZE,
            MAX_BRUSH_SIZE
        );
    }
    clamped
}
