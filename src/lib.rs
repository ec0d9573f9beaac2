//! Free-hand raster drawing canvas.
//!
//! A fixed-resolution backing store painted with brush, eraser and text
//! tools, driven by frontend pointer and keyboard events, with PNG export
//! and image import. The headless backend replays recorded interactions.

pub mod backend;
pub mod config;
pub mod draw;
pub mod input;
pub mod notification;
pub mod persist;
pub mod util;

pub use config::Config;
