//! Fixed-resolution pixel buffer holding the drawn image.
//!
//! The backing store is a cairo ARGB32 image surface whose size is chosen once
//! when the canvas is created. Its dimensions never follow the displayed size
//! of the canvas; pointer positions are mapped into its pixel space before any
//! drawing happens.

use thiserror::Error;

use super::color::Color;

/// Errors raised while creating or reading the backing store.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),
}

/// Straight (non-premultiplied) RGBA pixel read back from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque pixel matching the given color.
    pub fn opaque(color: Color) -> Self {
        let [r, g, b] = color.to_rgb8();
        Self { r, g, b, a: 255 }
    }

    fn from_premultiplied_argb(px: u32) -> Self {
        let a = (px >> 24) as u8;
        if a == 0 {
            return Self::TRANSPARENT;
        }
        let unpremultiply = |c: u32| -> u8 { ((c * 255 + a as u32 / 2) / a as u32).min(255) as u8 };
        Self {
            r: unpremultiply((px >> 16) & 0xff),
            g: unpremultiply((px >> 8) & 0xff),
            b: unpremultiply(px & 0xff),
            a,
        }
    }
}

/// The canvas pixel buffer.
///
/// Every mutation goes through [`BackingStore::context`] followed by
/// [`BackingStore::mark_modified`], which bumps the revision counter used to
/// detect stale asynchronous image loads.
pub struct BackingStore {
    surface: cairo::ImageSurface,
    width: u32,
    height: u32,
    revision: u64,
}

impl std::fmt::Debug for BackingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackingStore")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("revision", &self.revision)
            .finish()
    }
}

impl BackingStore {
    /// Creates a fully transparent store of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width as i32, height as i32)?;
        log::debug!("Created {}x{} backing store", width, height);

        Ok(Self {
            surface,
            width,
            height,
            revision: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Monotonic counter bumped by every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Underlying cairo surface, for compositing into a frontend.
    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Creates a drawing context targeting the store.
    ///
    /// Drop the context before reading pixels back.
    pub fn context(&self) -> Result<cairo::Context, RenderError> {
        Ok(cairo::Context::new(&self.surface)?)
    }

    /// Records that the pixel content changed.
    pub fn mark_modified(&mut self) {
        self.revision += 1;
    }

    /// Resets every pixel to transparent.
    pub fn clear(&mut self) -> Result<(), RenderError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint()?;
        drop(ctx);
        self.mark_modified();
        Ok(())
    }

    /// Reads a single pixel, or `None` when (x, y) is outside the store.
    pub fn pixel(&mut self, x: u32, y: u32) -> Result<Option<Rgba>, RenderError> {
        if x >= self.width || y >= self.height {
            return Ok(None);
        }
        let stride = self.surface.stride() as usize;
        let data = self.surface.data()?;
        let offset = y as usize * stride + x as usize * 4;
        let bytes = [
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ];
        Ok(Some(Rgba::from_premultiplied_argb(u32::from_ne_bytes(bytes))))
    }

    /// Copies the raw premultiplied ARGB32 bytes (row stride included).
    pub fn snapshot(&mut self) -> Result<Vec<u8>, RenderError> {
        Ok(self.surface.data()?.to_vec())
    }

    /// Composites the store over an opaque background into a new surface.
    ///
    /// Every transparent pixel of the store becomes `background`; opaque pixels
    /// are copied unchanged.
    pub fn flattened(&self, background: Color) -> Result<cairo::ImageSurface, RenderError> {
        let flat = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            self.width as i32,
            self.height as i32,
        )?;
        let ctx = cairo::Context::new(&flat)?;
        background.opaque().apply(&ctx);
        ctx.paint()?;
        ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
        ctx.paint()?;
        drop(ctx);
        flat.flush();
        Ok(flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};

    #[test]
    fn new_store_is_transparent() {
        let mut store = BackingStore::new(4, 3).unwrap();
        assert_eq!(store.width(), 4);
        assert_eq!(store.height(), 3);
        assert_eq!(store.pixel(3, 2).unwrap(), Some(Rgba::TRANSPARENT));
        assert_eq!(store.pixel(4, 0).unwrap(), None);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn zero_sized_store_is_rejected() {
        assert!(matches!(
            BackingStore::new(0, 10),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn clear_resets_pixels_and_bumps_revision() {
        let mut store = BackingStore::new(2, 2).unwrap();
        let ctx = store.context().unwrap();
        RED.apply(&ctx);
        ctx.paint().unwrap();
        drop(ctx);
        assert_eq!(store.pixel(1, 1).unwrap(), Some(Rgba::opaque(RED)));

        store.clear().unwrap();
        assert_eq!(store.pixel(1, 1).unwrap(), Some(Rgba::TRANSPARENT));
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn flatten_fills_transparency_and_keeps_opaque_pixels() {
        let store = BackingStore::new(2, 1).unwrap();
        let ctx = store.context().unwrap();
        BLACK.apply(&ctx);
        ctx.rectangle(0.0, 0.0, 1.0, 1.0);
        ctx.fill().unwrap();
        drop(ctx);

        let mut flat = store.flattened(WHITE).unwrap();
        let stride = flat.stride() as usize;
        let data = flat.data().unwrap();
        let left = u32::from_ne_bytes([data[0], data[1], data[2], data[3]]);
        let right = u32::from_ne_bytes([data[4], data[5], data[6], data[7]]);
        assert_eq!(left, 0xff00_0000);
        assert_eq!(right, 0xffff_ffff);
        assert!(stride >= 8);
    }
}
