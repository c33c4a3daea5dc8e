//! Overlay video sources.

/// Looping overlay clips.
pub mod overlay;
