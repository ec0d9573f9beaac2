//! Input handling and tool state machine.
//!
//! This module translates frontend pointer, touch and keyboard events into
//! drawing on the backing store. It maps display coordinates to backing-store
//! pixels, tracks the active tool and brush, and runs the interaction state
//! machine (idle, stroking, awaiting text).

pub mod events;
pub mod mapper;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, PointerEvent, TouchPoint};
pub use mapper::{CanvasPoint, DisplayRect};
pub use state::{InputState, InteractionState, PendingText};
pub use tool::{BrushConfig, Tool};
