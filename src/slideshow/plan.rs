use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::compose::blend::BlendMode;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{KenBurnsError, KenBurnsResult};
use crate::motion::profile::{MotionMode, MotionProfile};
use crate::motion::zoom_rate::{ZoomChoice, alternate_zoom};

/// Overlay video blended over every output frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub blend: BlendMode,
    #[serde(default = "default_overlay_opacity")]
    pub opacity: f32,
}

fn default_overlay_opacity() -> f32 {
    0.9
}

/// Thread usage while synthesizing a clip.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 16,
            threads: None,
        }
    }
}

/// Everything needed to turn a folder of images into one video.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    pub canvas: Canvas,
    pub fps: Fps,
    /// Duration for images without a manifest entry.
    pub default_duration_secs: f64,
    /// Motion shape. Its zoom pair is replaced per clip according to `zoom`.
    pub motion: MotionProfile,
    pub zoom: ZoomChoice,
    /// Swap the zoom pair on odd clips (linear mode only).
    pub alternate: bool,
    pub crossfade_secs: f64,
    pub overlay: Option<OverlayConfig>,
    pub threading: RenderThreading,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            fps: Fps::default(),
            default_duration_secs: 6.0,
            motion: MotionProfile::default(),
            zoom: ZoomChoice::default(),
            alternate: true,
            crossfade_secs: 0.0,
            overlay: None,
            threading: RenderThreading::default(),
        }
    }
}

impl SlideshowConfig {
    /// Read a JSON config. Missing fields take their defaults.
    pub fn load(path: &Path) -> KenBurnsResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read slideshow config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse slideshow config '{}'", path.display()))?;
        Ok(cfg)
    }

    /// Check every field; problems are reported as `InvalidConfiguration`.
    pub fn validate(&self) -> KenBurnsResult<()> {
        self.canvas.validate()?;
        Fps::new(self.fps.num, self.fps.den)?;
        if !(self.default_duration_secs.is_finite() && self.default_duration_secs > 0.0) {
            return Err(KenBurnsError::invalid_configuration(format!(
                "default duration must be > 0, got {}",
                self.default_duration_secs
            )));
        }
        if !self.crossfade_secs.is_finite() || self.crossfade_secs < 0.0 {
            return Err(KenBurnsError::invalid_configuration(format!(
                "crossfade must be >= 0 seconds, got {}",
                self.crossfade_secs
            )));
        }
        if let Some(ov) = &self.overlay
            && !(0.0..=1.0).contains(&ov.opacity)
        {
            return Err(KenBurnsError::invalid_configuration(format!(
                "overlay opacity must be in [0, 1], got {}",
                ov.opacity
            )));
        }
        if self.threading.threads == Some(0) {
            return Err(KenBurnsError::invalid_configuration(
                "threads must be >= 1 when set",
            ));
        }
        self.zoom.validate()
    }

    /// Frames shared by two neighbouring clips during a crossfade.
    pub fn crossfade_frames(&self) -> u64 {
        self.fps.secs_to_frames_round(self.crossfade_secs)
    }
}

/// One image's slot in the slideshow.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipPlan {
    pub path: PathBuf,
    pub duration_secs: f64,
    pub profile: MotionProfile,
}

/// Assign a duration and motion profile to each image.
///
/// `durations[i]` applies to `images[i]`; images past the end of `durations` fall back to the
/// configured default duration.
pub fn plan_slideshow(
    images: &[PathBuf],
    durations: &[f64],
    cfg: &SlideshowConfig,
) -> KenBurnsResult<Vec<ClipPlan>> {
    cfg.validate()?;
    if images.is_empty() {
        return Err(KenBurnsError::invalid_configuration(
            "slideshow needs at least one image",
        ));
    }
    if !durations.is_empty() && durations.len() < images.len() {
        tracing::warn!(
            images = images.len(),
            durations = durations.len(),
            fallback_secs = cfg.default_duration_secs,
            "more images than durations; extra images use the default duration"
        );
    }

    let mut plans = Vec::with_capacity(images.len());
    for (i, path) in images.iter().enumerate() {
        let duration_secs = durations
            .get(i)
            .copied()
            .unwrap_or(cfg.default_duration_secs);
        if !(duration_secs.is_finite() && duration_secs > 0.0) {
            return Err(KenBurnsError::invalid_configuration(format!(
                "duration for '{}' must be > 0, got {duration_secs}",
                path.display()
            )));
        }

        let mut pair = cfg.zoom.pair_for(duration_secs);
        if cfg.alternate && cfg.motion.mode == MotionMode::Linear {
            pair = alternate_zoom(i, pair);
        }
        let profile = cfg.motion.with_zoom(pair.0, pair.1);
        profile.validate()?;

        tracing::debug!(
            clip = i,
            path = %path.display(),
            duration_secs,
            z0 = profile.z0,
            z1 = profile.z1,
            "planned clip"
        );
        plans.push(ClipPlan {
            path: path.clone(),
            duration_secs,
            profile,
        });
    }
    Ok(plans)
}
