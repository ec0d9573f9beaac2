//! Generic input event types for frontend-independent handling.

use serde::{Deserialize, Serialize};

/// Generic key representation.
///
/// Frontends map their native key codes to these values. Only the keys the
/// text overlay reacts to are distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Regular character key
    Char(char),
    /// Return/Enter key (commits pending text)
    Return,
    /// Escape key (discards pending text)
    Escape,
    /// Backspace key
    Backspace,
    /// Unmapped or unrecognized key
    Unknown,
}

/// One contact point of a touch event, in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

/// A pointer or touch event as delivered by the frontend.
///
/// Positions are client coordinates; they are mapped into backing-store
/// pixels by [`super::mapper`] before any drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Mouse or pen pointer
    Mouse { client_x: f64, client_y: f64 },
    /// Touch event; only the first touch point is used
    Touch { touches: Vec<TouchPoint> },
}

impl PointerEvent {
    /// Convenience constructor for a mouse event.
    pub fn mouse(client_x: f64, client_y: f64) -> Self {
        Self::Mouse { client_x, client_y }
    }

    /// Convenience constructor for a single-finger touch event.
    pub fn touch(client_x: f64, client_y: f64) -> Self {
        Self::Touch {
            touches: vec![TouchPoint { client_x, client_y }],
        }
    }

    /// Client position of the event, or `None` for a touch without contacts.
    pub fn client_position(&self) -> Option<(f64, f64)> {
        match self {
            Self::Mouse { client_x, client_y } => Some((*client_x, *client_y)),
            Self::Touch { touches } => touches.first().map(|t| (t.client_x, t.client_y)),
        }
    }
}
