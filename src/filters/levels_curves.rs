//! Histogram-driven operators: Normalize and Equalize.
//!
//! These operators remap the tonal range of an image using statistics from
//! a [`Histogram`]. The histogram should describe the image the operator is
//! applied to; they are built once and then run as ordinary pipeline passes.

use log::warn;

use super::core::PointOperator;
use crate::histogram::Histogram;

// ============================================================================
// Normalize
// ============================================================================

/// Linear remap of `[src_min, src_max]` onto `[dst_min, dst_max]`.
///
/// # Arguments
/// * `src_min` - Input black point
/// * `src_max` - Input white point
/// * `dst_min` - Output black point
/// * `dst_max` - Output white point (may be below `dst_min` to invert)
///
/// # Returns
/// Operator computing
/// `(v - src_min) * (dst_max - dst_min) / (src_max - src_min) + dst_min`.
/// A degenerate input range (`src_max == src_min`) yields the identity.
pub fn normalize(src_min: f64, src_max: f64, dst_min: f64, dst_max: f64) -> PointOperator {
    let src_range = src_max - src_min;
    if src_range == 0.0 {
        warn!("normalize: empty source range at {}, using identity", src_min);
        return Box::new(|v: u8, _, _| v as f64);
    }

    let scale = (dst_max - dst_min) / src_range;
    Box::new(move |v: u8, _, _| (v as f64 - src_min) * scale + dst_min)
}

/// [`normalize`] with the source range taken from the observed extremes of
/// `histogram`. An empty histogram yields the identity.
pub fn normalize_from(histogram: &Histogram, dst_min: f64, dst_max: f64) -> PointOperator {
    match histogram.value_range() {
        Some((min, max)) => normalize(min as f64, max as f64, dst_min, dst_max),
        None => Box::new(|v: u8, _, _| v as f64),
    }
}

// ============================================================================
// Equalize
// ============================================================================

/// Histogram equalization within the observed range.
///
/// Each intensity is looked up in [`Histogram::rescale_cdf`], so frequent
/// levels are spread apart and rare ones are squeezed together while the
/// darkest and brightest levels stay in place.
///
/// # Returns
/// `None` for a histogram of an empty image
pub fn equalize(histogram: &Histogram) -> Option<PointOperator> {
    let curve = histogram.rescale_cdf()?;
    Some(Box::new(move |v: u8, _, _| curve[v as usize]))
}
