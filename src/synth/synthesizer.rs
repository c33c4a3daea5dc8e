use image::imageops::{self, FilterType};

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{KenBurnsError, KenBurnsResult};
use crate::motion::profile::MotionProfile;
use crate::synth::cache::ResampleCache;
use crate::synth::frame::FrameRgb;
use crate::synth::geometry::{CropPlan, cover_scale, crop_origin, scaled_dims};
use crate::synth::source::SourceImage;

/// Ken-Burns frame synthesizer for one source image.
///
/// Every frame is a pure function of its timestamp `t ∈ [0, duration)`: the source is scaled
/// by `cover_scale · zoom(t/duration)`, resampled with Lanczos, and a canvas-sized window is
/// cropped around the (optionally panned) center. The synthesizer holds no mutable state, so
/// requesting the same `t` twice yields identical pixels and it can be shared across threads.
#[derive(Clone, Debug)]
pub struct FrameSynthesizer {
    source: SourceImage,
    canvas: Canvas,
    duration_secs: f64,
    profile: MotionProfile,
    cover: f64,
}

impl FrameSynthesizer {
    /// Create a synthesizer for one clip.
    ///
    /// Fails with `InvalidConfiguration` for an empty canvas, a duration that is not a positive
    /// finite number, or a motion profile outside its accepted ranges.
    pub fn new(
        source: SourceImage,
        canvas: Canvas,
        duration_secs: f64,
        profile: MotionProfile,
    ) -> KenBurnsResult<Self> {
        canvas.validate()?;
        if !(duration_secs.is_finite() && duration_secs > 0.0) {
            return Err(KenBurnsError::invalid_configuration(format!(
                "clip duration must be a positive number of seconds, got {duration_secs}"
            )));
        }
        profile.validate()?;

        let cover = cover_scale(source.width(), source.height(), canvas);
        tracing::debug!(
            src_w = source.width(),
            src_h = source.height(),
            out_w = canvas.width,
            out_h = canvas.height,
            duration_secs,
            cover,
            "frame synthesizer ready"
        );

        Ok(Self {
            source,
            canvas,
            duration_secs,
            profile,
            cover,
        })
    }

    /// Output frame size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Clip duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Motion applied over the clip.
    pub fn profile(&self) -> &MotionProfile {
        &self.profile
    }

    /// Scale at which the source exactly covers the canvas (zoom `1.0`).
    pub fn cover_scale(&self) -> f64 {
        self.cover
    }

    /// Normalized progress `t / duration` for an in-range timestamp.
    pub fn progress(&self, t: f64) -> KenBurnsResult<f64> {
        if !(t >= 0.0 && t < self.duration_secs) {
            return Err(KenBurnsError::out_of_range(format!(
                "timestamp {t} outside [0, {})",
                self.duration_secs
            )));
        }
        Ok(t / self.duration_secs)
    }

    /// Frame geometry at timestamp `t`.
    pub fn plan_at(&self, t: f64) -> KenBurnsResult<CropPlan> {
        Ok(self.plan_at_progress(self.progress(t)?))
    }

    /// Frame geometry at normalized progress `u`, clamped to `[0, 1]`.
    ///
    /// Unlike [`plan_at`](Self::plan_at) this accepts `u = 1`, the limit of the clip.
    pub fn plan_at_progress(&self, u: f64) -> CropPlan {
        let u = u.clamp(0.0, 1.0);
        let zoom = self.profile.zoom_at(u);
        let scale = self.cover * zoom;
        let (scaled_w, scaled_h) =
            scaled_dims(self.source.width(), self.source.height(), scale, self.canvas);
        let pan_x = self.profile.pan_offset_px(u, scaled_w);
        let (x, y) = crop_origin(scaled_w, scaled_h, self.canvas, pan_x);
        CropPlan {
            zoom,
            scale,
            scaled_w,
            scaled_h,
            x,
            y,
        }
    }

    /// Synthesize the frame at timestamp `t` without caching.
    pub fn frame_at(&self, t: f64) -> KenBurnsResult<FrameRgb> {
        let plan = self.plan_at(t)?;
        let scaled = self.resample(plan.scaled_w, plan.scaled_h);
        Ok(self.crop(&scaled, &plan))
    }

    /// Synthesize the frame at timestamp `t`, reusing resampled images from `cache`.
    pub fn frame_at_cached(&self, t: f64, cache: &mut ResampleCache) -> KenBurnsResult<FrameRgb> {
        let plan = self.plan_at(t)?;
        let scaled = cache.get_or_insert_with(
            self.source.id(),
            plan.scaled_w,
            plan.scaled_h,
            || self.resample(plan.scaled_w, plan.scaled_h),
        );
        Ok(self.crop(&scaled, &plan))
    }

    /// Number of frames at `fps` whose timestamps fall inside `[0, duration)`.
    pub fn frame_count(&self, fps: Fps) -> u64 {
        fps.frames_in_secs(self.duration_secs)
    }

    /// Lazy frame sequence at `fps`. Each call starts again from frame 0.
    pub fn frames(&self, fps: Fps) -> Frames<'_> {
        Frames {
            synth: self,
            fps,
            next: 0,
            count: self.frame_count(fps),
            cache: ResampleCache::default(),
        }
    }

    fn resample(&self, w: u32, h: u32) -> image::RgbImage {
        imageops::resize(self.source.pixels(), w, h, FilterType::Lanczos3)
    }

    fn crop(&self, scaled: &image::RgbImage, plan: &CropPlan) -> FrameRgb {
        let window = imageops::crop_imm(
            scaled,
            plan.x,
            plan.y,
            self.canvas.width,
            self.canvas.height,
        );
        FrameRgb::from_image(window.to_image())
    }
}

/// Iterator over a synthesizer's frames at a fixed frame rate.
pub struct Frames<'a> {
    synth: &'a FrameSynthesizer,
    fps: Fps,
    next: u64,
    count: u64,
    cache: ResampleCache,
}

impl Frames<'_> {
    /// Timestamp of the next frame to be produced, if any remain.
    pub fn next_time_secs(&self) -> Option<f64> {
        (self.next < self.count).then(|| self.fps.frame_time_secs(self.next))
    }
}

impl Iterator for Frames<'_> {
    type Item = KenBurnsResult<FrameRgb>;

    fn next(&mut self) -> Option<Self::Item> {
        let t = self.next_time_secs()?;
        self.next += 1;
        Some(self.synth.frame_at_cached(t, &mut self.cache))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.count - self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Frames<'_> {}
