use std::path::Path;
use std::process::Command;

use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{KenBurnsError, KenBurnsResult};
use crate::synth::frame::FrameRgb;

/// Supplies one overlay frame per output frame index.
pub trait OverlaySource: Send + Sync {
    fn frame_at(&self, idx: FrameIndex) -> &FrameRgb;
}

/// A finite overlay clip repeated for as long as the output runs.
#[derive(Clone, Debug)]
pub struct LoopedOverlay {
    frames: Vec<FrameRgb>,
}

impl LoopedOverlay {
    /// Create an overlay from decoded frames. At least one frame is required and all must
    /// share one size.
    pub fn from_frames(frames: Vec<FrameRgb>) -> KenBurnsResult<Self> {
        let Some(first) = frames.first() else {
            return Err(KenBurnsError::source_unreadable("overlay has no frames"));
        };
        let size = (first.width, first.height);
        if frames.iter().any(|f| (f.width, f.height) != size) {
            return Err(KenBurnsError::invalid_configuration(
                "overlay frames must share one size",
            ));
        }
        Ok(Self { frames })
    }

    /// Decode a video with system `ffmpeg`, scaled to `canvas` and resampled to `fps`.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn decode_ffmpeg(path: &Path, canvas: Canvas, fps: Fps) -> KenBurnsResult<Self> {
        canvas.validate()?;
        let out = Command::new("ffmpeg")
            .args(["-v", "error", "-i"])
            .arg(path)
            .args([
                "-an",
                "-vf",
                &format!(
                    "scale={}:{}:flags=lanczos,fps={}/{}",
                    canvas.width, canvas.height, fps.num, fps.den
                ),
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgb24",
                "pipe:1",
            ])
            .output()
            .map_err(|e| {
                KenBurnsError::source_unreadable(format!(
                    "failed to run ffmpeg for overlay decode: {e}"
                ))
            })?;

        if !out.status.success() {
            return Err(KenBurnsError::source_unreadable(format!(
                "ffmpeg overlay decode failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let frames = split_raw_frames(&out.stdout, canvas)?;
        tracing::debug!(frames = frames.len(), "overlay decoded");
        Self::from_frames(frames)
    }

    /// Number of frames in one loop.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl OverlaySource for LoopedOverlay {
    fn frame_at(&self, idx: FrameIndex) -> &FrameRgb {
        let i = (idx.0 % self.frames.len() as u64) as usize;
        &self.frames[i]
    }
}

fn split_raw_frames(bytes: &[u8], canvas: Canvas) -> KenBurnsResult<Vec<FrameRgb>> {
    let frame_len = canvas.rgb_len();
    if bytes.len() < frame_len || !bytes.len().is_multiple_of(frame_len) {
        return Err(KenBurnsError::source_unreadable(format!(
            "decoded overlay has invalid size: got {} bytes, expected multiples of {frame_len}",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(frame_len)
        .map(|chunk| FrameRgb {
            width: canvas.width,
            height: canvas.height,
            data: chunk.to_vec(),
        })
        .collect())
}
