use std::path::PathBuf;

use image::{Rgb, RgbImage};
use kenburns::{
    Canvas, Ease, Fps, FrameSynthesizer, KenBurnsError, MotionProfile, SourceImage, ZoomRate,
};

fn checker(w: u32, h: u32) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| {
        if (x / 50 + y / 50) % 2 == 0 {
            Rgb([230, 40, 40])
        } else {
            Rgb([20, 20, 200])
        }
    })
}

#[test]
fn reference_scenario_from_png_on_disk() {
    let dir = PathBuf::from("target").join("synth_reference");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("source.png");
    checker(1000, 500).save(&path).unwrap();

    let source = SourceImage::open(&path).unwrap();
    assert_eq!((source.width(), source.height()), (1000, 500));

    let canvas = Canvas::new(1920, 1080).unwrap();
    let (z0, z1) = ZoomRate::default().zoom_for_duration(6.0);
    assert_eq!((z0, z1), (1.0, 1.08));

    let synth =
        FrameSynthesizer::new(source, canvas, 6.0, MotionProfile::linear(z0, z1)).unwrap();
    assert!((synth.cover_scale() - 2.16).abs() < 1e-12);

    let start = synth.plan_at(0.0).unwrap();
    assert_eq!((start.scaled_w, start.scaled_h), (2160, 1080));
    assert_eq!((start.x, start.y), (120, 0));

    let limit = synth.plan_at_progress(1.0);
    assert_eq!((limit.scaled_w, limit.scaled_h), (2333, 1166));

    let frame = synth.frame_at(0.0).unwrap();
    assert_eq!((frame.width, frame.height), (1920, 1080));
    assert_eq!(frame.data.len(), 1920 * 1080 * 3);
}

#[test]
fn same_timestamp_gives_identical_pixels() {
    let source = SourceImage::from_rgb(checker(320, 240)).unwrap();
    let synth = FrameSynthesizer::new(
        source,
        Canvas::new(160, 90).unwrap(),
        4.0,
        MotionProfile::eased_push_pan(1.0, 1.25),
    )
    .unwrap();

    for t in [0.0, 1.3, 2.0, 3.99] {
        assert_eq!(synth.frame_at(t).unwrap(), synth.frame_at(t).unwrap());
    }

    let fps = Fps::new(5, 1).unwrap();
    let first: Vec<_> = synth.frames(fps).map(Result::unwrap).collect();
    let second: Vec<_> = synth.frames(fps).map(Result::unwrap).collect();
    assert_eq!(first.len(), 20);
    assert_eq!(first, second);
}

#[test]
fn zoom_boundaries_per_mode() {
    let source = SourceImage::from_rgb(checker(200, 100)).unwrap();
    let canvas = Canvas::new(100, 100).unwrap();

    let linear =
        FrameSynthesizer::new(source.clone(), canvas, 2.0, MotionProfile::linear(1.0, 1.3))
            .unwrap();
    assert_eq!(linear.plan_at(0.0).unwrap().zoom, 1.0);
    assert!((linear.plan_at_progress(1.0).zoom - 1.3).abs() < 1e-12);
    assert!(linear.plan_at(1.999).unwrap().zoom > 1.29);

    let pingpong = FrameSynthesizer::new(
        source.clone(),
        canvas,
        2.0,
        MotionProfile {
            ease: Ease::Smoothstep,
            ..MotionProfile::pingpong(1.0, 1.3)
        },
    )
    .unwrap();
    assert_eq!(pingpong.plan_at(0.0).unwrap().zoom, 1.0);
    assert!((pingpong.plan_at(1.0).unwrap().zoom - 1.3).abs() < 1e-12);
    assert!((pingpong.plan_at_progress(1.0).zoom - 1.0).abs() < 1e-12);
}

#[test]
fn error_taxonomy_at_the_boundary() {
    let err = SourceImage::from_bytes(&[0x89, b'P', b'N', b'G']).unwrap_err();
    assert!(matches!(err, KenBurnsError::SourceUnreadable(_)));

    let source = SourceImage::from_rgb(checker(10, 10)).unwrap();
    let err = FrameSynthesizer::new(
        source.clone(),
        Canvas::new(4, 4).unwrap(),
        0.0,
        MotionProfile::default(),
    )
    .unwrap_err();
    assert!(matches!(err, KenBurnsError::InvalidConfiguration(_)));

    let synth =
        FrameSynthesizer::new(source, Canvas::new(4, 4).unwrap(), 1.0, MotionProfile::default())
            .unwrap();
    assert!(matches!(
        synth.frame_at(1.0).unwrap_err(),
        KenBurnsError::OutOfRange(_)
    ));
}
