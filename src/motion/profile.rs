use std::f64::consts::PI;

use crate::foundation::error::{KenBurnsError, KenBurnsResult};
use crate::motion::ease::Ease;

/// Shape of the zoom curve over a clip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionMode {
    /// Straight interpolation `z0 → z1` across the clip.
    #[default]
    Linear,
    /// `z0 → z1` over the first half, back to `z0` over the second half.
    PingPong,
}

/// Zoom/pan motion applied on top of the cover scale.
///
/// Zoom factors are multipliers over the cover scale: `1.0` covers the canvas exactly, larger
/// values crop further into the source.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionProfile {
    pub mode: MotionMode,
    pub z0: f64,
    pub z1: f64,
    /// Horizontal sweep amplitude as a fraction of the scaled width. `0.0` disables panning.
    pub pan_fraction: f64,
    pub ease: Ease,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::linear(1.0, 1.08)
    }
}

impl MotionProfile {
    /// Pan amplitude used by the push-in/push-out preset.
    pub const PUSH_PAN_FRACTION: f64 = 0.12;

    /// Largest accepted zoom factor over the cover scale.
    pub const MAX_ZOOM: f64 = 8.0;

    pub fn linear(z0: f64, z1: f64) -> Self {
        Self {
            mode: MotionMode::Linear,
            z0,
            z1,
            pan_fraction: 0.0,
            ease: Ease::None,
        }
    }

    pub fn pingpong(z0: f64, z1: f64) -> Self {
        Self {
            mode: MotionMode::PingPong,
            ..Self::linear(z0, z1)
        }
    }

    /// Smoothstep-eased push with a left-right-left horizontal sweep.
    pub fn eased_push_pan(z0: f64, z1: f64) -> Self {
        Self {
            mode: MotionMode::Linear,
            z0,
            z1,
            pan_fraction: Self::PUSH_PAN_FRACTION,
            ease: Ease::Smoothstep,
        }
    }

    /// Same motion shape with a different zoom pair.
    pub fn with_zoom(self, z0: f64, z1: f64) -> Self {
        Self { z0, z1, ..self }
    }

    pub fn validate(&self) -> KenBurnsResult<()> {
        for (name, z) in [("z0", self.z0), ("z1", self.z1)] {
            if !(1.0..=Self::MAX_ZOOM).contains(&z) {
                return Err(KenBurnsError::invalid_configuration(format!(
                    "{name} must be a zoom factor in [1.0, {}], got {z}",
                    Self::MAX_ZOOM
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.pan_fraction) {
            return Err(KenBurnsError::invalid_configuration(format!(
                "pan_fraction must be in [0, 1], got {}",
                self.pan_fraction
            )));
        }
        Ok(())
    }

    /// Zoom factor at normalized progress `u` in `[0, 1]`.
    pub fn zoom_at(&self, u: f64) -> f64 {
        let e = self.ease.apply(u);
        let dz = self.z1 - self.z0;
        match self.mode {
            MotionMode::Linear => self.z0 + dz * e,
            MotionMode::PingPong => {
                if e <= 0.5 {
                    self.z0 + dz * (e / 0.5)
                } else {
                    self.z1 - dz * ((e - 0.5) / 0.5)
                }
            }
        }
    }

    /// Horizontal crop-center offset in pixels for a scaled image `scaled_w` wide.
    ///
    /// Follows `amp · sin(π(u − 0.5))` with `amp = trunc(pan_fraction · scaled_w)`, so the
    /// window starts left of center, crosses it at the midpoint, and ends right of it.
    pub fn pan_offset_px(&self, u: f64, scaled_w: u32) -> i64 {
        if self.pan_fraction == 0.0 {
            return 0;
        }
        let w = f64::from(scaled_w);
        let amp = (w * self.pan_fraction).trunc().min(w);
        (amp * (PI * (u.clamp(0.0, 1.0) - 0.5)).sin()).trunc() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_hits_both_endpoints() {
        let p = MotionProfile::linear(1.0, 1.08);
        assert_eq!(p.zoom_at(0.0), 1.0);
        assert!((p.zoom_at(1.0) - 1.08).abs() < 1e-12);
        assert!((p.zoom_at(0.5) - 1.04).abs() < 1e-12);
    }

    #[test]
    fn linear_zoom_out_reverses() {
        let p = MotionProfile::linear(1.08, 1.0);
        assert_eq!(p.zoom_at(0.0), 1.08);
        assert!((p.zoom_at(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pingpong_peaks_at_midpoint_and_returns() {
        let p = MotionProfile::pingpong(1.0, 1.2);
        assert_eq!(p.zoom_at(0.0), 1.0);
        assert!((p.zoom_at(0.5) - 1.2).abs() < 1e-12);
        assert!((p.zoom_at(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pingpong_is_symmetric_about_midpoint() {
        for ease in [Ease::None, Ease::Smoothstep] {
            let p = MotionProfile {
                ease,
                ..MotionProfile::pingpong(1.0, 1.35)
            };
            for i in 0..=100 {
                let u = f64::from(i) / 100.0;
                assert!(
                    (p.zoom_at(u) - p.zoom_at(1.0 - u)).abs() < 1e-9,
                    "asymmetric at u={u} ({ease:?})"
                );
            }
        }
    }

    #[test]
    fn eased_push_is_slow_at_the_ends() {
        let p = MotionProfile::eased_push_pan(1.0, 1.25);
        let start_step = p.zoom_at(0.05) - p.zoom_at(0.0);
        let mid_step = p.zoom_at(0.525) - p.zoom_at(0.475);
        assert!(start_step < mid_step);
        assert!((p.zoom_at(1.0) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn pan_sweeps_left_to_right() {
        let p = MotionProfile::eased_push_pan(1.0, 1.25);
        assert_eq!(p.pan_offset_px(0.0, 1000), -120);
        assert_eq!(p.pan_offset_px(0.5, 1000), 0);
        assert_eq!(p.pan_offset_px(1.0, 1000), 120);
        assert_eq!(MotionProfile::linear(1.0, 1.1).pan_offset_px(0.0, 1000), 0);
    }

    #[test]
    fn validation_rejects_sub_cover_and_non_finite() {
        assert!(MotionProfile::linear(0.9, 1.0).validate().is_err());
        assert!(MotionProfile::linear(1.0, f64::NAN).validate().is_err());
        let bad_pan = MotionProfile {
            pan_fraction: -0.1,
            ..MotionProfile::default()
        };
        assert!(bad_pan.validate().is_err());
        assert!(MotionProfile::eased_push_pan(1.25, 1.0).validate().is_ok());
    }

    #[test]
    fn validation_bounds_zoom_and_pan_from_above() {
        let err = MotionProfile::linear(1.0, 1e300).validate().unwrap_err();
        assert!(matches!(err, KenBurnsError::InvalidConfiguration(_)));
        assert!(MotionProfile::linear(MotionProfile::MAX_ZOOM, 1.0).validate().is_ok());

        let huge_pan = MotionProfile {
            pan_fraction: 1e19,
            ..MotionProfile::linear(1.0, 1.1)
        };
        let err = huge_pan.validate().unwrap_err();
        assert!(matches!(err, KenBurnsError::InvalidConfiguration(_)));
        let full_pan = MotionProfile {
            pan_fraction: 1.0,
            ..MotionProfile::linear(1.0, 1.1)
        };
        assert!(full_pan.validate().is_ok());
    }

    #[test]
    fn pan_offset_never_exceeds_scaled_width() {
        let p = MotionProfile {
            pan_fraction: 1e19,
            ..MotionProfile::linear(1.0, 1.1)
        };
        assert_eq!(p.pan_offset_px(1.0, 1000), 1000);
        assert_eq!(p.pan_offset_px(0.0, 1000), -1000);
    }

    #[test]
    fn deserializes_with_defaults() {
        let p: MotionProfile = serde_json::from_str(r#"{"z0": 1.0, "z1": 1.2}"#).unwrap();
        assert_eq!(p, MotionProfile::linear(1.0, 1.2));

        let p: MotionProfile =
            serde_json::from_str(r#"{"mode": "pingpong", "ease": "smoothstep"}"#).unwrap();
        assert_eq!(p.mode, MotionMode::PingPong);
        assert_eq!(p.ease, Ease::Smoothstep);
        assert_eq!((p.z0, p.z1), (1.0, 1.08));
    }
}
