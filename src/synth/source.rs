use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbImage;

use crate::foundation::error::{KenBurnsError, KenBurnsResult};

/// Decoded, immutable RGB8 source image for one clip.
///
/// Cloning is cheap; pixel data is shared read-only.
#[derive(Clone, Debug)]
pub struct SourceImage {
    id: u64,
    pixels: Arc<RgbImage>,
}

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

impl SourceImage {
    /// Decode an image file. Any container `image` understands is accepted.
    pub fn open(path: &Path) -> KenBurnsResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            KenBurnsError::source_unreadable(format!("failed to read '{}': {e}", path.display()))
        })?;
        Self::from_bytes(&bytes).map_err(|e| match e {
            KenBurnsError::SourceUnreadable(msg) => {
                KenBurnsError::source_unreadable(format!("'{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Decode an in-memory encoded image.
    pub fn from_bytes(bytes: &[u8]) -> KenBurnsResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .map_err(|e| KenBurnsError::source_unreadable(format!("decode image: {e}")))?;
        Self::from_rgb(dyn_img.to_rgb8())
    }

    /// Wrap already-decoded pixels. Zero-area images are rejected.
    pub fn from_rgb(pixels: RgbImage) -> KenBurnsResult<Self> {
        let (w, h) = pixels.dimensions();
        if w == 0 || h == 0 {
            return Err(KenBurnsError::source_unreadable(format!(
                "image has degenerate dimensions {w}x{h}"
            )));
        }
        Ok(Self {
            id: NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed),
            pixels: Arc::new(pixels),
        })
    }

    /// Source width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Source height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Process-unique identity, shared by clones of the same decoded image.
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn pixels(&self) -> &RgbImage {
        &self.pixels
    }
}
