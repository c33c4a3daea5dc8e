use std::path::{Path, PathBuf};
use std::process::Command;

use image::{Rgb, RgbImage};
use kenburns::{
    Canvas, FfmpegSink, FfmpegSinkOpts, Fps, FrameIndex, LoopedOverlay, OverlaySource,
    SlideshowConfig, discover_images, is_ffmpeg_on_path, plan_slideshow, render_slideshow,
};

fn synth_overlay_clip(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let status = Command::new("ffmpeg")
        .args([
            "-v",
            "error",
            "-y",
            "-f",
            "lavfi",
            "-i",
            "testsrc=size=64x48:rate=30",
            "-t",
            "1",
            "-pix_fmt",
            "yuv420p",
            "-c:v",
            "libx264",
        ])
        .arg(path)
        .status()?;
    anyhow::ensure!(status.success(), "ffmpeg failed creating overlay clip");
    Ok(())
}

#[test]
fn slideshow_encodes_to_mp4() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }

    let dir = PathBuf::from("target").join("ffmpeg_sink");
    let _ = std::fs::remove_dir_all(&dir);
    let images_dir = dir.join("images");
    std::fs::create_dir_all(&images_dir).unwrap();
    for (i, c) in [[240, 30, 30], [30, 240, 30]].iter().enumerate() {
        RgbImage::from_pixel(80, 60, Rgb(*c))
            .save(images_dir.join(format!("{i}.png")))
            .unwrap();
    }

    let cfg = SlideshowConfig {
        canvas: Canvas::new(64, 36).unwrap(),
        fps: Fps::new(12, 1).unwrap(),
        default_duration_secs: 0.5,
        crossfade_secs: 0.25,
        ..SlideshowConfig::default()
    };
    let plans = plan_slideshow(&discover_images(&images_dir).unwrap(), &[], &cfg).unwrap();

    let out = dir.join("out").join("show.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    let stats = render_slideshow(&plans, &cfg, None, &mut sink).unwrap();

    assert_eq!(stats.frames, 9);
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn odd_canvas_is_rejected_before_spawning() {
    let cfg = SlideshowConfig {
        canvas: Canvas::new(63, 36).unwrap(),
        fps: Fps::new(12, 1).unwrap(),
        default_duration_secs: 0.5,
        ..SlideshowConfig::default()
    };
    let images_dir = PathBuf::from("target").join("ffmpeg_sink_odd");
    std::fs::create_dir_all(&images_dir).unwrap();
    RgbImage::from_pixel(8, 8, Rgb([0, 0, 0]))
        .save(images_dir.join("a.png"))
        .unwrap();
    let plans = plan_slideshow(&discover_images(&images_dir).unwrap(), &[], &cfg).unwrap();

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(images_dir.join("odd.mp4")));
    let err = render_slideshow(&plans, &cfg, None, &mut sink).unwrap_err();
    assert!(matches!(err, kenburns::KenBurnsError::InvalidConfiguration(_)));
}

#[test]
fn overlay_decodes_at_canvas_size_and_output_rate() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }

    let clip = PathBuf::from("target").join("ffmpeg_overlay").join("overlay.mp4");
    synth_overlay_clip(&clip).unwrap();

    let canvas = Canvas::new(16, 8).unwrap();
    let overlay = LoopedOverlay::decode_ffmpeg(&clip, canvas, Fps::new(10, 1).unwrap()).unwrap();

    // One second resampled to 10 fps.
    assert!((9..=11).contains(&overlay.len()), "got {} frames", overlay.len());
    let first = overlay.frame_at(FrameIndex(0));
    assert_eq!((first.width, first.height), (16, 8));
    assert_eq!(
        overlay.frame_at(FrameIndex(overlay.len() as u64)),
        first,
        "index wraps to the start"
    );
}

#[test]
fn overlay_decode_of_missing_file_is_unreadable() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let err = LoopedOverlay::decode_ffmpeg(
        Path::new("target/ffmpeg_overlay/does_not_exist.mp4"),
        Canvas::new(16, 8).unwrap(),
        Fps::new(10, 1).unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err, kenburns::KenBurnsError::SourceUnreadable(_)));
}
