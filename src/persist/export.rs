//! PNG export of the backing store.

use super::types::PersistError;
use crate::draw::{BackingStore, Color};

/// Encodes the store as PNG, composited over an opaque `background`.
///
/// Transparent pixels come out as the background color; opaque content is
/// preserved exactly.
pub fn export_png(store: &BackingStore, background: Color) -> Result<Vec<u8>, PersistError> {
    let flat = store.flattened(background)?;
    let mut bytes = Vec::new();
    flat.write_to_png(&mut bytes)
        .map_err(|e| PersistError::Encode(e.to_string()))?;

    log::debug!(
        "Exported {}x{} canvas as {} PNG bytes",
        store.width(),
        store.height(),
        bytes.len()
    );
    Ok(bytes)
}
