use std::path::Path;

use anyhow::Context as _;
use image::RgbImage;

use crate::foundation::core::Canvas;
use crate::foundation::error::{KenBurnsError, KenBurnsResult};

/// One synthesized output frame: interleaved RGB8, row-major, top-to-bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRgb {
    /// Solid-color frame, mostly useful as a fill for tests and overlays.
    pub fn filled(canvas: Canvas, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(canvas.rgb_len());
        for _ in 0..(canvas.width as usize * canvas.height as usize) {
            data.extend_from_slice(&rgb);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    /// Take ownership of an `RgbImage` buffer.
    pub fn from_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// RGB triple at `(x, y)`. Panics when out of bounds, like slice indexing.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let off = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[off], self.data[off + 1], self.data[off + 2]]
    }

    pub fn into_image(self) -> KenBurnsResult<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| KenBurnsError::invalid_configuration("frame buffer length mismatch"))
    }

    /// Write the frame as a PNG, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> KenBurnsResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}
