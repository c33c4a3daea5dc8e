use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use kenburns::{
    BlendMode, DurationManifest, Ease, FfmpegSink, FfmpegSinkOpts, Fps, FrameSynthesizer,
    LoopedOverlay, MotionMode, MotionProfile, OverlayConfig, OverlayLayer, SlideshowConfig,
    SourceImage, ZoomChoice, ZoomRate,
};

#[derive(Parser, Debug)]
#[command(name = "kenburns", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize a single frame of one image as a PNG.
    Frame(FrameArgs),
    /// Render a folder of images into an MP4 slideshow (requires `ffmpeg` on PATH).
    Slideshow(SlideshowArgs),
    /// Print the zoom pair suggested for a clip duration.
    Zoom(ZoomArgs),
}

#[derive(Args, Debug, Clone)]
struct MotionArgs {
    /// Zoom curve.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Easing applied to clip progress.
    #[arg(long, value_enum)]
    ease: Option<EaseChoice>,

    /// Horizontal pan amplitude as a fraction of the scaled width.
    #[arg(long)]
    pan: Option<f64>,

    /// Eased push-in/push-out with a horizontal sweep.
    #[arg(long)]
    push_pan: bool,

    /// Fixed zoom pair `z0,z1`, e.g. `1.0,1.25`.
    #[arg(long, value_parser = parse_zoom_pair)]
    zoom: Option<(f64, f64)>,

    /// Output width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Source image.
    #[arg(long)]
    image: PathBuf,

    /// Timestamp in seconds, in `[0, duration)`.
    #[arg(long, default_value_t = 0.0)]
    t: f64,

    /// Clip duration in seconds.
    #[arg(long, default_value_t = 6.0)]
    duration: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    motion: MotionArgs,
}

#[derive(Parser, Debug)]
struct SlideshowArgs {
    /// Folder containing the images (png, jpg, jpeg, webp, bmp).
    #[arg(long)]
    folder: PathBuf,

    /// Output MP4 path.
    #[arg(long, default_value = "kenburns.mp4")]
    out: PathBuf,

    /// Slideshow config JSON; flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Duration manifest JSON with per-image durations.
    #[arg(long)]
    durations: Option<PathBuf>,

    /// Seconds per image when no manifest entry exists.
    #[arg(long)]
    duration: Option<f64>,

    #[arg(long)]
    fps: Option<u32>,

    /// Crossfade between neighbouring images, in seconds.
    #[arg(long)]
    crossfade: Option<f64>,

    /// Overlay video looped over the whole slideshow.
    #[arg(long)]
    overlay: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = BlendChoice::Screen)]
    blend: BlendChoice,

    #[arg(long, default_value_t = 0.9)]
    opacity: f32,

    /// Keep the same zoom direction for every image.
    #[arg(long)]
    no_alternate: bool,

    /// Synthesize frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    #[command(flatten)]
    motion: MotionArgs,
}

#[derive(Parser, Debug)]
struct ZoomArgs {
    /// Clip duration in seconds.
    #[arg(long)]
    duration: f64,

    #[arg(long, default_value_t = 1.08)]
    zmin: f64,

    #[arg(long, default_value_t = 1.35)]
    zmax: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Linear,
    Pingpong,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EaseChoice {
    None,
    Smoothstep,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BlendChoice {
    Normal,
    Screen,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Slideshow(args) => cmd_slideshow(args),
        Command::Zoom(args) => cmd_zoom(args),
    }
}

fn parse_zoom_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `z0,z1`, got '{s}'"))?;
    let z0 = a
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad z0 '{a}': {e}"))?;
    let z1 = b
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad z1 '{b}': {e}"))?;
    Ok((z0, z1))
}

fn apply_motion_args(args: &MotionArgs, cfg: &mut SlideshowConfig) {
    if args.push_pan {
        cfg.motion = MotionProfile::eased_push_pan(cfg.motion.z0, cfg.motion.z1);
    }
    if let Some(mode) = args.mode {
        cfg.motion.mode = match mode {
            ModeChoice::Linear => MotionMode::Linear,
            ModeChoice::Pingpong => MotionMode::PingPong,
        };
    }
    if let Some(ease) = args.ease {
        cfg.motion.ease = match ease {
            EaseChoice::None => Ease::None,
            EaseChoice::Smoothstep => Ease::Smoothstep,
        };
    }
    if let Some(pan) = args.pan {
        cfg.motion.pan_fraction = pan;
    }
    if let Some((z0, z1)) = args.zoom {
        cfg.zoom = ZoomChoice::Fixed { z0, z1 };
    }
    if let Some(w) = args.width {
        cfg.canvas.width = w;
    }
    if let Some(h) = args.height {
        cfg.canvas.height = h;
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut cfg = SlideshowConfig::default();
    apply_motion_args(&args.motion, &mut cfg);

    let (z0, z1) = cfg.zoom.pair_for(args.duration);
    let profile = cfg.motion.with_zoom(z0, z1);

    let source = SourceImage::open(&args.image)?;
    let synth = FrameSynthesizer::new(source, cfg.canvas, args.duration, profile)?;
    let frame = synth.frame_at(args.t)?;
    frame.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// Load the config file (if any) and apply command-line overrides on top.
fn slideshow_config(args: &SlideshowArgs) -> anyhow::Result<SlideshowConfig> {
    let mut cfg = match &args.config {
        Some(path) => SlideshowConfig::load(path)?,
        None => SlideshowConfig::default(),
    };
    apply_motion_args(&args.motion, &mut cfg);
    if let Some(d) = args.duration {
        cfg.default_duration_secs = d;
    }
    if let Some(fps) = args.fps {
        cfg.fps = Fps::new(fps, 1)?;
    }
    if let Some(c) = args.crossfade {
        cfg.crossfade_secs = c;
    }
    if let Some(path) = &args.overlay {
        cfg.overlay = Some(OverlayConfig {
            path: path.clone(),
            blend: match args.blend {
                BlendChoice::Normal => BlendMode::Normal,
                BlendChoice::Screen => BlendMode::Screen,
            },
            opacity: args.opacity,
        });
    }
    if args.no_alternate {
        cfg.alternate = false;
    }
    if args.parallel {
        cfg.threading.parallel = true;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_slideshow(args: SlideshowArgs) -> anyhow::Result<()> {
    let cfg = slideshow_config(&args)?;

    let images = kenburns::discover_images(&args.folder)?;
    let durations = match &args.durations {
        Some(path) => DurationManifest::load(path)?.durations(),
        None => Vec::new(),
    };
    let plans = kenburns::plan_slideshow(&images, &durations, &cfg)?;

    let overlay = match &cfg.overlay {
        Some(ov) => Some((
            LoopedOverlay::decode_ffmpeg(&ov.path, cfg.canvas, cfg.fps)
                .with_context(|| format!("load overlay '{}'", ov.path.display()))?,
            ov.blend,
            ov.opacity,
        )),
        None => None,
    };
    let layer = overlay.as_ref().map(|(source, blend, opacity)| OverlayLayer {
        source,
        blend: *blend,
        opacity: *opacity,
    });

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&args.out));
    let stats = kenburns::render_slideshow(&plans, &cfg, layer, &mut sink)?;

    eprintln!(
        "wrote {} ({} images, {} frames)",
        args.out.display(),
        stats.clips,
        stats.frames
    );
    Ok(())
}

fn cmd_zoom(args: ZoomArgs) -> anyhow::Result<()> {
    let rate = ZoomRate {
        zmin: args.zmin,
        zmax: args.zmax,
        ..ZoomRate::default()
    };
    rate.validate()?;
    let (z0, z1) = rate.zoom_for_duration(args.duration);
    println!("{z0} {z1}");
    Ok(())
}
