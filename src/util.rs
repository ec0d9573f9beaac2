//! Utility functions for colors and geometry.
//!
//! This module provides:
//! - Color name mapping used by the configuration and script parsers
//! - The axis-aligned [`Rect`] used for dirty-region tracking
//! - Segment bounding boxes for incremental repaint

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Returns a human-readable name for a color, or the hex form for custom colors.
pub fn color_to_name(color: &Color) -> String {
    let named = [
        (RED, "Red"),
        (GREEN, "Green"),
        (BLUE, "Blue"),
        (YELLOW, "Yellow"),
        (ORANGE, "Orange"),
        (PINK, "Pink"),
        (WHITE, "White"),
        (BLACK, "Black"),
    ];

    named
        .iter()
        .find(|(known, _)| known.to_rgb8() == color.to_rgb8())
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| color.to_hex())
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned rectangle helper used for dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::new(
            min_x,
            min_y,
            max_x.saturating_sub(min_x),
            max_y.saturating_sub(min_y),
        )
    }

    /// Clamps the rectangle to `0..width` × `0..height`, dropping it if nothing remains.
    pub fn clamp_to_bounds(self, width: i32, height: i32) -> Option<Rect> {
        let min_x = self.x.clamp(0, width);
        let min_y = self.y.clamp(0, height);
        let max_x = self.x.saturating_add(self.width).clamp(0, width);
        let max_y = self.y.saturating_add(self.height).clamp(0, height);
        Rect::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Returns true if the pixel at (x, y) lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x.saturating_add(self.width)
            && y < self.y.saturating_add(self.height)
    }
}

/// Coordinates beyond this magnitude are pinned before converting to `i32`,
/// so width and height stay representable.
const COORD_LIMIT: f64 = (i32::MAX / 4) as f64;

/// Bounding box of a round-capped segment of the given line width.
///
/// The box is padded by half the line width plus one pixel of antialiasing.
pub fn segment_bounds(x1: f64, y1: f64, x2: f64, y2: f64, line_width: f64) -> Option<Rect> {
    let pad = line_width / 2.0 + 1.0;
    let to_px = |v: f64| v.clamp(-COORD_LIMIT, COORD_LIMIT) as i32;
    let min_x = to_px((x1.min(x2) - pad).floor());
    let min_y = to_px((y1.min(y2) - pad).floor());
    let max_x = to_px((x1.max(x2) + pad).ceil());
    let max_y = to_px((y1.max(y2) + pad).ceil());
    Rect::from_min_max(min_x, min_y, max_x, max_y)
}
