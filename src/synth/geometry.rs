use crate::foundation::core::Canvas;

/// Minimal uniform scale at which a `src_w × src_h` image covers `canvas` in both axes.
pub fn cover_scale(src_w: u32, src_h: u32, canvas: Canvas) -> f64 {
    let sx = f64::from(canvas.width) / f64::from(src_w);
    let sy = f64::from(canvas.height) / f64::from(src_h);
    sx.max(sy)
}

/// Pixel size of the source after uniform scaling by `scale`.
///
/// Rounds to nearest. The result never drops below the canvas: float rounding at exact cover
/// can otherwise land one pixel short.
pub fn scaled_dims(src_w: u32, src_h: u32, scale: f64, canvas: Canvas) -> (u32, u32) {
    let w = (f64::from(src_w) * scale).round().max(1.0) as u32;
    let h = (f64::from(src_h) * scale).round().max(1.0) as u32;
    (w.max(canvas.width), h.max(canvas.height))
}

/// Top-left corner of the canvas-sized crop window inside a `scaled_w × scaled_h` image.
///
/// The window is centered (plus `pan_x` pixels horizontally) and then clamped so it always
/// lies within the scaled image.
pub fn crop_origin(scaled_w: u32, scaled_h: u32, canvas: Canvas, pan_x: i64) -> (u32, u32) {
    let x_center = i64::from(scaled_w / 2).saturating_add(pan_x);
    let y_center = i64::from(scaled_h / 2);

    let x1 = x_center.saturating_sub(i64::from(canvas.width / 2));
    let y1 = y_center - i64::from(canvas.height / 2);

    let max_x = i64::from(scaled_w.saturating_sub(canvas.width));
    let max_y = i64::from(scaled_h.saturating_sub(canvas.height));

    (x1.clamp(0, max_x) as u32, y1.clamp(0, max_y) as u32)
}

/// Geometry of one frame: everything needed to resample and crop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropPlan {
    /// Zoom multiplier over the cover scale.
    pub zoom: f64,
    /// Effective scale applied to the source.
    pub scale: f64,
    pub scaled_w: u32,
    pub scaled_h: u32,
    /// Crop window top-left, in scaled-image pixels.
    pub x: u32,
    pub y: u32,
}
