//! Pure calculation functions for resize geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Compute the uniform scale ratio that fits `width x height` inside `max`.
///
/// The branching is deliberately asymmetric: width only controls the ratio
/// when it is strictly the longer side, so a square image goes through the
/// height branch.
///
/// # Examples
/// ```
/// # use imgfit::imaging::compute_ratio;
/// assert_eq!(compute_ratio(1000.0, 500.0, 500.0), 0.5);
/// assert_eq!(compute_ratio(400.0, 300.0, 500.0), 1.0);
/// ```
pub fn compute_ratio(width: f64, height: f64, max: f64) -> f64 {
    if width > height && width > max {
        max / width
    } else if height > max {
        max / height
    } else {
        1.0
    }
}

/// Scale a single pixel length by `ratio`, flooring the result.
///
/// Never returns zero: encoders reject empty images, so a sliver that would
/// floor away keeps one pixel.
pub fn scale_length(length: u32, ratio: f64) -> u32 {
    ((length as f64 * ratio).floor() as u32).max(1)
}

/// Scale an offset (frame position) by `ratio`, flooring the result.
///
/// Unlike [`scale_length`] an offset of zero is valid.
pub fn scale_offset(offset: u32, ratio: f64) -> u32 {
    (offset as f64 * ratio).floor() as u32
}

/// Target dimensions for a `(width, height)` image scaled by `ratio`.
pub fn scaled_dimensions(dims: (u32, u32), ratio: f64) -> (u32, u32) {
    (scale_length(dims.0, ratio), scale_length(dims.1, ratio))
}
