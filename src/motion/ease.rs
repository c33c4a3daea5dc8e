/// Easing curves used to map normalized clip progress before zoom interpolation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity mapping (constant zoom rate).
    #[default]
    None,
    /// `u²(3 − 2u)`: slow start, slow end.
    Smoothstep,
}

impl Ease {
    /// Apply this easing function to normalized progress `u` in `[0, 1]`.
    pub fn apply(self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        match self {
            Self::None => u,
            Self::Smoothstep => u * u * (3.0 - 2.0 * u),
        }
    }
}
