//! Rendering primitives and the canvas backing store (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`BackingStore`]: the fixed-resolution pixel buffer holding the image
//! - [`StrokeStyle`] and the segment/text/image rendering functions
//! - [`DirtyTracker`]: damaged regions for incremental repaint

pub mod backing;
pub mod color;
pub mod dirty;
pub mod font;
pub mod render;

// Re-export commonly used types at module level
pub use backing::{BackingStore, RenderError, Rgba};
pub use color::Color;
pub use dirty::DirtyTracker;
pub use font::FontDescriptor;
pub use render::{StrokeStyle, render_image_fill, render_segment, render_text};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
