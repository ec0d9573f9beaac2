//! Image persistence for paintpad.
//!
//! This module provides:
//! - PNG export of the backing store flattened onto its background
//! - Saving the export to the configured directory
//! - Decoding image files with the `image` crate
//! - Asynchronous loading on a tokio runtime, applied back on the UI thread

pub mod decode;
pub mod export;
pub mod file;
pub mod types;

mod loader;

pub use decode::{apply_loaded_image, decode_image_bytes, decode_image_file, image_to_surface};
pub use export::export_png;
pub use file::{FileSaveConfig, save_png};
pub use loader::ImageLoader;
pub use types::{LoadCompletion, LoadedImage, PersistError};
