use crate::foundation::error::{KenBurnsError, KenBurnsResult};
use crate::foundation::math::{mul_div255_u16, unit_to_u8};
use crate::synth::frame::FrameRgb;

/// How an overlay layer combines with the frame underneath.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// `b·(1 − a) + o·a`.
    Normal,
    /// `1 − (1 − b)(1 − o·a)`; black in the overlay leaves the base untouched.
    #[default]
    Screen,
}

pub fn blend_px(base: u8, overlay: u8, mode: BlendMode, opacity: f32) -> u8 {
    let b = f32::from(base) / 255.0;
    let o = f32::from(overlay) / 255.0 * opacity;
    let out = match mode {
        BlendMode::Normal => b * (1.0 - opacity) + o,
        BlendMode::Screen => 1.0 - (1.0 - b) * (1.0 - o),
    };
    unit_to_u8(out)
}

/// Blend `overlay` over `base` in place.
pub fn overlay_in_place(
    base: &mut FrameRgb,
    overlay: &FrameRgb,
    mode: BlendMode,
    opacity: f32,
) -> KenBurnsResult<()> {
    if base.width != overlay.width || base.height != overlay.height {
        return Err(KenBurnsError::invalid_configuration(format!(
            "overlay size mismatch: got {}x{}, expected {}x{}",
            overlay.width, overlay.height, base.width, base.height
        )));
    }
    let opacity = opacity.clamp(0.0, 1.0);
    for (d, s) in base.data.iter_mut().zip(overlay.data.iter()) {
        *d = blend_px(*d, *s, mode, opacity);
    }
    Ok(())
}

/// Linear crossfade: `t = 0` keeps `outgoing`, `t = 1` yields `incoming`.
pub fn crossfade_px(outgoing: u8, incoming: u8, t: f32) -> u8 {
    let tt = ((t.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
    let it = 255u16 - tt;
    let v = mul_div255_u16(u16::from(outgoing), it) + mul_div255_u16(u16::from(incoming), tt);
    v.min(255) as u8
}

/// Crossfade `incoming` into `outgoing` in place.
pub fn crossfade_in_place(
    outgoing: &mut FrameRgb,
    incoming: &FrameRgb,
    t: f32,
) -> KenBurnsResult<()> {
    if outgoing.width != incoming.width || outgoing.height != incoming.height {
        return Err(KenBurnsError::invalid_configuration(format!(
            "crossfade size mismatch: {}x{} vs {}x{}",
            outgoing.width, outgoing.height, incoming.width, incoming.height
        )));
    }
    for (d, s) in outgoing.data.iter_mut().zip(incoming.data.iter()) {
        *d = crossfade_px(*d, *s, t);
    }
    Ok(())
}
