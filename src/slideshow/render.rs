use rayon::prelude::*;

use crate::compose::blend::{BlendMode, crossfade_in_place, overlay_in_place};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{KenBurnsError, KenBurnsResult};
use crate::media::overlay::OverlaySource;
use crate::slideshow::plan::{ClipPlan, RenderThreading, SlideshowConfig};
use crate::synth::cache::ResampleCache;
use crate::synth::frame::FrameRgb;
use crate::synth::source::SourceImage;
use crate::synth::synthesizer::FrameSynthesizer;

/// Counters reported after a slideshow render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub clips: usize,
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Frames produced by blending two clips.
    pub crossfaded: u64,
}

/// Overlay layer applied to every emitted frame.
pub struct OverlayLayer<'a> {
    pub source: &'a dyn OverlaySource,
    pub blend: BlendMode,
    pub opacity: f32,
}

/// Decode each planned image and stream the whole slideshow into `sink`.
pub fn render_slideshow(
    plans: &[ClipPlan],
    cfg: &SlideshowConfig,
    overlay: Option<OverlayLayer<'_>>,
    sink: &mut dyn FrameSink,
) -> KenBurnsResult<RenderStats> {
    render_clips(
        plans.len(),
        |i| {
            let plan = &plans[i];
            let source = SourceImage::open(&plan.path)?;
            FrameSynthesizer::new(source, cfg.canvas, plan.duration_secs, plan.profile)
        },
        cfg,
        overlay,
        sink,
    )
}

/// Stream `clip_count` clips, built on demand by `make_clip`, into `sink`.
///
/// Clips are built one ahead of the clip being rendered, so at most two decoded sources are
/// alive at once. With a crossfade, the tail frames of a clip are held back and blended with
/// the head of the next.
#[tracing::instrument(skip_all, fields(clips = clip_count))]
pub fn render_clips<F>(
    clip_count: usize,
    mut make_clip: F,
    cfg: &SlideshowConfig,
    overlay: Option<OverlayLayer<'_>>,
    sink: &mut dyn FrameSink,
) -> KenBurnsResult<RenderStats>
where
    F: FnMut(usize) -> KenBurnsResult<FrameSynthesizer>,
{
    cfg.validate()?;
    if clip_count == 0 {
        return Err(KenBurnsError::invalid_configuration(
            "slideshow needs at least one clip",
        ));
    }

    let pool = if cfg.threading.parallel {
        Some(build_thread_pool(cfg.threading.threads)?)
    } else {
        None
    };

    sink.begin(SinkConfig {
        canvas: cfg.canvas,
        fps: cfg.fps,
    })?;

    let mut out = Emitter {
        sink,
        overlay,
        next: 0,
        stats: RenderStats::default(),
    };

    let fade = cfg.crossfade_frames();
    let mut held: Vec<FrameRgb> = Vec::new();
    let mut next_clip = Some(make_clip(0)?);

    for i in 0..clip_count {
        let Some(clip) = next_clip.take() else {
            break;
        };
        if i + 1 < clip_count {
            next_clip = Some(make_clip(i + 1)?);
        }

        let count = clip.frame_count(cfg.fps);
        let head = held.len() as u64;
        let tail = match &next_clip {
            Some(next) => fade
                .min(count - head)
                .min(next.frame_count(cfg.fps)),
            None => 0,
        };
        tracing::debug!(clip = i, frames = count, head, tail, "rendering clip");

        let incoming = std::mem::take(&mut held);
        let mut k = 0u64;
        for_each_frame(&clip, cfg.fps, &cfg.threading, pool.as_ref(), |frame| {
            if k < head {
                let mut mixed = incoming[k as usize].clone();
                let t = (k + 1) as f32 / (head + 1) as f32;
                crossfade_in_place(&mut mixed, &frame, t)?;
                out.stats.crossfaded += 1;
                out.emit(mixed)?;
            } else if k >= count - tail {
                held.push(frame);
            } else {
                out.emit(frame)?;
            }
            k += 1;
            Ok(())
        })?;
        out.stats.clips += 1;
    }

    // A crossfade is never scheduled after the last clip, so nothing is left behind.
    debug_assert!(held.is_empty());

    let stats = out.stats;
    out.sink.end()?;
    tracing::info!(
        clips = stats.clips,
        frames = stats.frames,
        crossfaded = stats.crossfaded,
        "slideshow rendered"
    );
    Ok(stats)
}

struct Emitter<'a, 'o> {
    sink: &'a mut dyn FrameSink,
    overlay: Option<OverlayLayer<'o>>,
    next: u64,
    stats: RenderStats,
}

impl Emitter<'_, '_> {
    fn emit(&mut self, mut frame: FrameRgb) -> KenBurnsResult<()> {
        let idx = FrameIndex(self.next);
        if let Some(layer) = &self.overlay {
            overlay_in_place(
                &mut frame,
                layer.source.frame_at(idx),
                layer.blend,
                layer.opacity,
            )?;
        }
        self.sink.push_frame(idx, &frame)?;
        self.next += 1;
        self.stats.frames += 1;
        Ok(())
    }
}

/// Feed every frame of `clip` to `f` in timeline order.
fn for_each_frame(
    clip: &FrameSynthesizer,
    fps: Fps,
    threading: &RenderThreading,
    pool: Option<&rayon::ThreadPool>,
    mut f: impl FnMut(FrameRgb) -> KenBurnsResult<()>,
) -> KenBurnsResult<()> {
    let Some(pool) = pool else {
        for frame in clip.frames(fps) {
            f(frame?)?;
        }
        return Ok(());
    };

    let count = clip.frame_count(fps);
    let chunk = normalized_chunk_size(threading.chunk_size);
    let mut start = 0u64;
    while start < count {
        let end = (start + chunk).min(count);
        let rendered = pool.install(|| {
            (start..end)
                .into_par_iter()
                .map_init(ResampleCache::default, |cache, i| {
                    clip.frame_at_cached(fps.frame_time_secs(i), cache)
                })
                .collect::<Vec<_>>()
        });
        for frame in rendered {
            f(frame?)?;
        }
        start = end;
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> KenBurnsResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(KenBurnsError::invalid_configuration(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        KenBurnsError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}
