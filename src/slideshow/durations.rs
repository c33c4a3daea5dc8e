use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

use crate::foundation::error::KenBurnsResult;

/// Per-image durations grouped by scene, as written by the prompt-generation step.
///
/// ```json
/// {"items": [{"seconds": 12.0, "images_count": 3, "prompts": ["a", "b", "c"]}]}
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct DurationManifest {
    #[serde(default)]
    pub items: Vec<DurationItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DurationItem {
    #[serde(default)]
    pub seconds: Option<f64>,
    #[serde(default)]
    pub seconds_per_image: Option<f64>,
    /// Accepts integral floats such as `3.0`; fractions are truncated.
    #[serde(default)]
    pub images_count: Option<f64>,
    /// `null` reads as no prompts.
    #[serde(default)]
    pub prompts: Option<Vec<serde_json::Value>>,
}

impl DurationItem {
    /// Seconds each image of this item is shown.
    pub fn seconds_per_image(&self) -> f64 {
        if let Some(spi) = self.seconds_per_image {
            return spi;
        }
        let secs = self.seconds.unwrap_or(0.0);
        let count = match self.images_count {
            Some(n) if n != 0.0 => n.trunc().max(0.0) as usize,
            _ => self.prompt_count(),
        };
        if count == 0 {
            secs
        } else {
            secs / count as f64
        }
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.as_ref().map_or(0, Vec::len)
    }
}

impl DurationManifest {
    pub fn from_json_str(s: &str) -> KenBurnsResult<Self> {
        Ok(serde_json::from_str(s).context("parse duration manifest JSON")?)
    }

    /// Read a manifest from a JSON file.
    pub fn load(path: &Path) -> KenBurnsResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read duration manifest '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// One duration per prompt, in manifest order.
    pub fn durations(&self) -> Vec<f64> {
        let mut out = Vec::new();
        for item in &self.items {
            let spi = item.seconds_per_image();
            out.extend(std::iter::repeat_n(spi, item.prompt_count()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_seconds_per_image_wins() {
        let m = DurationManifest::from_json_str(
            r#"{"items": [{"seconds": 10, "seconds_per_image": 2.5, "prompts": ["a", "b"]}]}"#,
        )
        .unwrap();
        assert_eq!(m.durations(), vec![2.5, 2.5]);
    }

    #[test]
    fn splits_seconds_by_image_count_then_prompts() {
        let m = DurationManifest::from_json_str(
            r#"{"items": [
                {"seconds": 12, "images_count": 3, "prompts": ["a", "b", "c"]},
                {"seconds": 8, "prompts": ["d", "e"]},
                {"seconds": 5, "images_count": 0, "prompts": ["f"]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(m.durations(), vec![4.0, 4.0, 4.0, 4.0, 4.0, 5.0]);
    }

    #[test]
    fn items_without_prompts_emit_nothing() {
        let m = DurationManifest::from_json_str(r#"{"items": [{"seconds": 3}]}"#).unwrap();
        assert!(m.durations().is_empty());
        let empty = DurationManifest::from_json_str("{}").unwrap();
        assert!(empty.durations().is_empty());
    }

    #[test]
    fn null_prompts_and_float_counts_are_accepted() {
        let m = DurationManifest::from_json_str(
            r#"{"items": [
                {"seconds": 3, "prompts": null},
                {"seconds": 9, "images_count": 3.0, "prompts": ["a", "b", "c"]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(m.items[0].prompt_count(), 0);
        assert_eq!(m.durations(), vec![3.0, 3.0, 3.0]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(DurationManifest::from_json_str("{items: nope").is_err());
    }
}
