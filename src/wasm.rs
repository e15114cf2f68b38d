//! WebAssembly exports for graytone.
//!
//! These functions are exposed to JavaScript via wasm-bindgen and take the
//! flat RGBA bytes of a canvas `ImageData` directly.
//!
//! Adjusted images come back as opaque RGBA with R=G=B=gray, ready for
//! `putImageData`. Shape errors surface as JavaScript exceptions.

use wasm_bindgen::prelude::*;

use crate::filters::core::apply_transform_list;
use crate::filters::grayscale::{from_buffer, to_buffer};
use crate::filters::levels_curves::equalize;
use crate::histogram::Histogram;
use crate::params::{recompute, AdjustmentParams};

// ============================================================================
// Statistics
// ============================================================================

/// Per-level pixel counts (256 entries) of the grayscale version of an image.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
#[wasm_bindgen]
pub fn histogram_rgba_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u32>, JsError> {
    let image = from_buffer(data, width, height)?;
    Ok(Histogram::compute(&image).bins().to_vec())
}

/// Normalized cumulative distribution (256 entries, empty for an empty image).
#[wasm_bindgen]
pub fn cdf_rgba_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<f64>, JsError> {
    let image = from_buffer(data, width, height)?;
    Ok(Histogram::compute(&image).cdf().to_vec())
}

// ============================================================================
// Adjustments
// ============================================================================

/// Grayscale, then brighten, contrast and normalize an RGBA image.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `brighten` - Offset added to every value (0 = no change)
/// * `contrast` - Multiplier around 128 (1 = no change)
/// * `normalized_min` - Output black point (0-255)
/// * `normalized_max` - Output white point (0-255)
///
/// # Returns
/// Flat array of RGBA bytes with grayscale values
#[wasm_bindgen]
pub fn adjust_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    brighten: f64,
    contrast: f64,
    normalized_min: f64,
    normalized_max: f64,
) -> Result<Vec<u8>, JsError> {
    let image = from_buffer(data, width, height)?;
    let params = AdjustmentParams {
        brighten,
        contrast,
        normalized_min_value: normalized_min,
        normalized_max_value: normalized_max,
    };
    let adjusted = recompute(&image, &params)?;
    Ok(to_buffer(&adjusted.image))
}

/// Grayscale and histogram-equalize an RGBA image.
#[wasm_bindgen]
pub fn equalize_rgba_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let mut image = from_buffer(data, width, height)?;
    let hist = Histogram::compute(&image);
    if let Some(op) = equalize(&hist) {
        apply_transform_list(&mut image, &[op]);
    }
    Ok(to_buffer(&image))
}
