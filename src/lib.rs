//! Ken-Burns slideshow synthesis.
//!
//! The core is [`FrameSynthesizer`]: given one source image, an output canvas, a clip duration,
//! and a [`MotionProfile`], it produces canvas-sized RGB frames on demand, each a crop of the
//! source scaled to cover the canvas and zoomed/panned as a function of time.
//!
//! Around it sit the pieces that make a slideshow:
//!
//! - plan clips from a folder of images ([`discover_images`], [`plan_slideshow`])
//! - stream them, optionally crossfaded and overlaid, into a [`FrameSink`]
//!   ([`render_slideshow`])
//! - encode with the system `ffmpeg` ([`FfmpegSink`])
#![forbid(unsafe_code)]

mod foundation;

/// Per-pixel compositing.
pub mod compose;
/// Encoding sinks.
pub mod encode;
/// Overlay sources.
pub mod media;
/// Zoom and pan curves.
pub mod motion;
/// Slideshow planning and rendering.
pub mod slideshow;
/// Frame synthesis.
pub mod synth;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex};
pub use crate::foundation::error::{KenBurnsError, KenBurnsResult};

pub use crate::compose::blend::BlendMode;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::media::overlay::{LoopedOverlay, OverlaySource};
pub use crate::motion::ease::Ease;
pub use crate::motion::profile::{MotionMode, MotionProfile};
pub use crate::motion::zoom_rate::{ZoomChoice, ZoomRate, alternate_zoom};
pub use crate::slideshow::discover::discover_images;
pub use crate::slideshow::durations::DurationManifest;
pub use crate::slideshow::plan::{
    ClipPlan, OverlayConfig, RenderThreading, SlideshowConfig, plan_slideshow,
};
pub use crate::slideshow::render::{OverlayLayer, RenderStats, render_clips, render_slideshow};
pub use crate::synth::cache::{ResampleCache, ResampleCacheStats};
pub use crate::synth::frame::FrameRgb;
pub use crate::synth::geometry::CropPlan;
pub use crate::synth::source::SourceImage;
pub use crate::synth::synthesizer::{FrameSynthesizer, Frames};
