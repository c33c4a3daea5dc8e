//! Folder-of-images to video: discovery, duration manifests, planning, and rendering.

/// Image discovery.
pub mod discover;
/// Per-image duration manifests.
pub mod durations;
/// Slideshow configuration and per-clip planning.
pub mod plan;
/// Streaming clips into a frame sink.
pub mod render;
