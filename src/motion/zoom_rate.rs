use crate::foundation::error::{KenBurnsError, KenBurnsResult};

/// Constant perceived zoom speed, expressed as `delta_z` gained over `reference_secs`.
///
/// Clips of any length zoom at the same rate, with the end zoom clamped to
/// `[zmin, zmax]` so very short clips still move and very long ones do not over-crop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ZoomRate {
    pub delta_z: f64,
    pub reference_secs: f64,
    pub zmin: f64,
    pub zmax: f64,
}

impl Default for ZoomRate {
    fn default() -> Self {
        Self {
            delta_z: 0.08,
            reference_secs: 6.0,
            zmin: 1.08,
            zmax: 1.35,
        }
    }
}

impl ZoomRate {
    pub fn validate(&self) -> KenBurnsResult<()> {
        if !(self.reference_secs.is_finite() && self.reference_secs > 0.0) {
            return Err(KenBurnsError::invalid_configuration(format!(
                "zoom reference_secs must be > 0, got {}",
                self.reference_secs
            )));
        }
        if !self.delta_z.is_finite() || self.delta_z < 0.0 {
            return Err(KenBurnsError::invalid_configuration(format!(
                "zoom delta_z must be finite and >= 0, got {}",
                self.delta_z
            )));
        }
        if !(self.zmin.is_finite() && self.zmax.is_finite())
            || self.zmin < 1.0
            || self.zmin > self.zmax
        {
            return Err(KenBurnsError::invalid_configuration(format!(
                "zoom bounds must satisfy 1.0 <= zmin <= zmax, got [{}, {}]",
                self.zmin, self.zmax
            )));
        }
        Ok(())
    }

    /// Zoom units gained per second.
    pub fn per_sec(&self) -> f64 {
        self.delta_z / self.reference_secs
    }

    /// Suggested `(z0, z1)` for a clip lasting `duration_secs`.
    pub fn zoom_for_duration(&self, duration_secs: f64) -> (f64, f64) {
        let ideal = 1.0 + self.per_sec() * duration_secs;
        (1.0, ideal.clamp(self.zmin, self.zmax))
    }
}

/// How a slideshow picks the zoom pair of each clip.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ZoomChoice {
    /// Same pair for every clip.
    Fixed { z0: f64, z1: f64 },
    /// Pair derived from each clip's duration.
    FromDuration(ZoomRate),
}

impl Default for ZoomChoice {
    fn default() -> Self {
        Self::FromDuration(ZoomRate::default())
    }
}

impl ZoomChoice {
    pub fn validate(&self) -> KenBurnsResult<()> {
        match self {
            Self::Fixed { .. } => Ok(()),
            Self::FromDuration(rate) => rate.validate(),
        }
    }

    pub fn pair_for(&self, duration_secs: f64) -> (f64, f64) {
        match self {
            Self::Fixed { z0, z1 } => (*z0, *z1),
            Self::FromDuration(rate) => rate.zoom_for_duration(duration_secs),
        }
    }
}

/// Swap the zoom pair on odd indices so a slideshow alternates zoom-in and zoom-out.
pub fn alternate_zoom(index: usize, pair: (f64, f64)) -> (f64, f64) {
    if index % 2 == 0 { pair } else { (pair.1, pair.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_point_reproduces_itself() {
        let rate = ZoomRate::default();
        assert_eq!(rate.zoom_for_duration(6.0), (1.0, 1.08));
    }

    #[test]
    fn short_and_long_clips_clamp() {
        let rate = ZoomRate::default();
        assert_eq!(rate.zoom_for_duration(1.0), (1.0, 1.08));
        assert_eq!(rate.zoom_for_duration(600.0), (1.0, 1.35));

        let (_, z1) = rate.zoom_for_duration(12.0);
        assert!((z1 - 1.16).abs() < 1e-12);
    }

    #[test]
    fn alternation_swaps_odd_indices() {
        assert_eq!(alternate_zoom(0, (1.0, 1.2)), (1.0, 1.2));
        assert_eq!(alternate_zoom(1, (1.0, 1.2)), (1.2, 1.0));
        assert_eq!(alternate_zoom(4, (1.0, 1.2)), (1.0, 1.2));
    }

    #[test]
    fn validation_catches_bad_bounds() {
        let bad = ZoomRate {
            zmin: 1.5,
            zmax: 1.2,
            ..ZoomRate::default()
        };
        assert!(bad.validate().is_err());
        let bad = ZoomRate {
            reference_secs: 0.0,
            ..ZoomRate::default()
        };
        assert!(bad.validate().is_err());
        assert!(ZoomRate::default().validate().is_ok());
    }

    #[test]
    fn zoom_choice_from_json() {
        let c: ZoomChoice = serde_json::from_str(r#"{"kind": "fixed", "z0": 1.0, "z1": 1.25}"#)
            .unwrap();
        assert_eq!(c.pair_for(3.0), (1.0, 1.25));

        let c: ZoomChoice =
            serde_json::from_str(r#"{"kind": "from_duration", "zmax": 1.2}"#).unwrap();
        assert_eq!(c.pair_for(600.0), (1.0, 1.2));
    }
}
