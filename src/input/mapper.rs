//! Mapping between display (client) coordinates and backing-store pixels.
//!
//! The canvas element may be displayed at any size; the backing store keeps
//! its fixed resolution. Every pointer position is scaled by
//! `backing / displayed` per axis before it reaches the drawing code.

use serde::{Deserialize, Serialize};

use super::events::PointerEvent;

/// On-screen bounding rectangle of an element, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A position in backing-store pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Maps a pointer event into backing-store pixels.
///
/// Returns `None` for events without a position (touch with no contacts) or
/// when the display rectangle has no area; callers treat both as no-ops.
pub fn map_event(
    event: &PointerEvent,
    canvas_rect: &DisplayRect,
    backing_width: u32,
    backing_height: u32,
) -> Option<CanvasPoint> {
    let (client_x, client_y) = event.client_position()?;
    map_client(client_x, client_y, canvas_rect, backing_width, backing_height)
}

/// Maps a client position into backing-store pixels.
pub fn map_client(
    client_x: f64,
    client_y: f64,
    canvas_rect: &DisplayRect,
    backing_width: u32,
    backing_height: u32,
) -> Option<CanvasPoint> {
    if canvas_rect.is_degenerate() {
        return None;
    }
    let scale_x = backing_width as f64 / canvas_rect.width;
    let scale_y = backing_height as f64 / canvas_rect.height;
    Some(CanvasPoint {
        x: (client_x - canvas_rect.left) * scale_x,
        y: (client_y - canvas_rect.top) * scale_y,
    })
}

/// Maps a backing-store point back to display space, relative to `parent_rect`.
///
/// This is where a floating overlay anchored at `point` must be placed inside
/// the canvas's parent container.
pub fn canvas_to_parent(
    point: CanvasPoint,
    canvas_rect: &DisplayRect,
    parent_rect: &DisplayRect,
    backing_width: u32,
    backing_height: u32,
) -> (f64, f64) {
    let scale_x = canvas_rect.width / backing_width as f64;
    let scale_y = canvas_rect.height / backing_height as f64;
    (
        point.x * scale_x + canvas_rect.left - parent_rect.left,
        point.y * scale_y + canvas_rect.top - parent_rect.top,
    )
}
