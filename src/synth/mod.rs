//! Ken-Burns frame synthesis: cover scaling, zoom/pan cropping, and resampling.

/// Resampled-image cache.
pub mod cache;
/// Output frame buffers.
pub mod frame;
/// Cover-scale and crop-window geometry.
pub mod geometry;
/// Decoded source images.
pub mod source;
/// The per-clip frame synthesizer.
pub mod synthesizer;
