//! Data types for image export and import.

use crate::draw::RenderError;
use std::path::PathBuf;
use thiserror::Error;

/// A decoded image waiting to be applied to the backing store.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// File the image was read from.
    pub source: PathBuf,
    /// Backing store revision when the load was requested.
    pub revision: u64,
    /// Decoded straight-alpha RGBA8 pixels.
    pub image: image::RgbaImage,
}

/// Result of one background load, posted back to the UI thread.
#[derive(Debug)]
pub struct LoadCompletion {
    pub source: PathBuf,
    /// Request number; later requests supersede earlier ones.
    pub generation: u64,
    pub result: Result<LoadedImage, PersistError>,
}

/// Errors that can occur while saving or loading images.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Please select an image file.")]
    NoFileSelected,

    #[error("Failed to access image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Discarded {}: the canvas changed while it was loading", path.display())]
    StaleLoad { path: PathBuf },

    #[error("Image loader is not running")]
    LoaderStopped,
}
