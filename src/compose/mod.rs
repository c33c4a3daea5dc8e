//! Per-pixel compositing of RGB8 frames.

/// Overlay blending and crossfades.
pub mod blend;
