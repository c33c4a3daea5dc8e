//! Zoom and pan curves evaluated per frame.

/// Easing curves applied to clip progress.
pub mod ease;
/// Zoom/pan motion profiles.
pub mod profile;
/// Zoom amplitude derived from clip duration.
pub mod zoom_rate;
