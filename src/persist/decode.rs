//! Image decoding and application to the backing store.

use super::types::{LoadedImage, PersistError};
use crate::draw::{RenderError, render_image_fill};
use crate::input::InputState;
use std::fs;
use std::path::Path;

/// Decodes an in-memory image in any format the `image` crate supports.
pub fn decode_image_bytes(bytes: &[u8], path: &Path) -> Result<image::RgbaImage, PersistError> {
    image::load_from_memory(bytes)
        .map(|decoded| decoded.to_rgba8())
        .map_err(|e| PersistError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads and decodes an image file.
pub fn decode_image_file(path: &Path) -> Result<image::RgbaImage, PersistError> {
    let bytes = fs::read(path).map_err(|e| PersistError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let image = decode_image_bytes(&bytes, path)?;
    log::debug!(
        "Decoded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Converts straight-alpha RGBA8 pixels into a premultiplied ARGB32 surface.
pub fn image_to_surface(image: &image::RgbaImage) -> Result<cairo::ImageSurface, RenderError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(RenderError::InvalidDimensions { width, height });
    }

    let mut surface =
        cairo::ImageSurface::create(cairo::Format::ARgb32, width as i32, height as i32)?;
    let stride = surface.stride() as usize;
    {
        let mut data = surface.data()?;
        for (x, y, pixel) in image.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            let premultiply = |c: u8| (c as u32 * a as u32 + 127) / 255;
            let argb = ((a as u32) << 24)
                | (premultiply(r) << 16)
                | (premultiply(g) << 8)
                | premultiply(b);
            let offset = y as usize * stride + x as usize * 4;
            data[offset..offset + 4].copy_from_slice(&argb.to_ne_bytes());
        }
    }
    surface.mark_dirty();
    Ok(surface)
}

/// Replaces the canvas with a loaded image stretched to the store size.
///
/// Rejects the image with [`PersistError::StaleLoad`] when the store was
/// modified after the load was requested.
pub fn apply_loaded_image(state: &mut InputState, loaded: &LoadedImage) -> Result<(), PersistError> {
    if state.store.revision() != loaded.revision {
        log::warn!(
            "Discarding load of {}: requested at revision {}, canvas now at {}",
            loaded.source.display(),
            loaded.revision,
            state.store.revision()
        );
        return Err(PersistError::StaleLoad {
            path: loaded.source.clone(),
        });
    }

    let source = image_to_surface(&loaded.image)?;
    let width = state.store.width() as f64;
    let height = state.store.height() as f64;
    let ctx = state.store.context()?;
    render_image_fill(&ctx, &source, width, height)?;
    drop(ctx);

    state.store.mark_modified();
    state.mark_full_damage();
    log::info!(
        "Loaded {} into {}x{} canvas",
        loaded.source.display(),
        state.store.width(),
        state.store.height()
    );
    Ok(())
}
