use crate::foundation::error::{KenBurnsError, KenBurnsResult};

/// Absolute 0-based frame index in output timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> KenBurnsResult<Self> {
        if den == 0 {
            return Err(KenBurnsError::invalid_configuration("fps den must be > 0"));
        }
        if num == 0 {
            return Err(KenBurnsError::invalid_configuration("fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Timestamp in seconds of frame `i` relative to the start of a clip.
    pub fn frame_time_secs(self, i: u64) -> f64 {
        (i as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Number of frames whose timestamps `i/fps` fall inside `[0, secs)`.
    pub fn frames_in_secs(self, secs: f64) -> u64 {
        if secs.is_nan() || secs <= 0.0 {
            return 0;
        }
        let exact = secs * self.as_f64();
        // Guard the float product against landing a hair above an integer.
        let rounded = exact.round();
        if (exact - rounded).abs() < 1e-9 {
            // Frame 0 at t = 0 is always inside a non-empty clip.
            return (rounded as u64).max(1);
        }
        exact.ceil() as u64
    }

    /// Convert seconds to frame count using round-to-nearest semantics.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated, non-empty canvas.
    pub fn new(width: u32, height: u32) -> KenBurnsResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Reject zero-sized canvases.
    pub fn validate(self) -> KenBurnsResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(KenBurnsError::invalid_configuration(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Byte length of one interleaved RGB8 frame at this size.
    pub fn rgb_len(self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}
