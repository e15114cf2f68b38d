//! RGBA pixel-buffer bridge.
//!
//! Converts between interleaved RGBA bytes (4 per pixel, row-major, as
//! produced by canvas/`ImageData`-style APIs) and [`GrayscaleImage`].
//! Uses ITU-R BT.601 luminosity coefficients.

use ndarray::{Array2, ArrayView3};

use crate::error::{ImageError, Result};
use crate::image::{checked_len, GrayscaleImage};

/// ITU-R BT.601 luminosity coefficients
pub const LUMA_R: f64 = 0.299;
pub const LUMA_G: f64 = 0.587;
pub const LUMA_B: f64 = 0.114;

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Luminosity of one RGB triple, rounded to nearest.
#[inline]
pub fn luminosity(r: u8, g: u8, b: u8) -> u8 {
    let gray = LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64;
    gray.round().clamp(0.0, 255.0) as u8
}

/// Convert an RGBA buffer to a grayscale image (luminosity method).
///
/// Alpha is ignored.
///
/// # Arguments
/// * `buffer` - Flat RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Grayscale image of shape (height, width), or `InvalidShape` when the
/// buffer length does not match the dimensions (`DimensionsOverflow` when
/// they cannot be multiplied out)
pub fn from_buffer(buffer: &[u8], width: usize, height: usize) -> Result<GrayscaleImage> {
    let expected = checked_len(height, width, CHANNELS)?;
    if buffer.len() != expected {
        return Err(ImageError::InvalidShape {
            what: "RGBA buffer",
            expected,
            actual: buffer.len(),
        });
    }

    let gray: Vec<u8> = buffer
        .chunks_exact(CHANNELS)
        .map(|px| luminosity(px[0], px[1], px[2]))
        .collect();

    GrayscaleImage::from_vec(height, width, gray)
}

/// Convert a grayscale image to an opaque RGBA buffer with R=G=B=gray.
///
/// # Returns
/// Flat RGBA bytes (length = width * height * 4), row-major
pub fn to_buffer(image: &GrayscaleImage) -> Vec<u8> {
    let mut output = Vec::with_capacity(image.len() * CHANNELS);

    for &gray in image.view().iter() {
        output.extend_from_slice(&[gray, gray, gray, 255]);
    }

    output
}

/// Convert an RGBA array of shape (height, width, 4) to a grayscale image.
///
/// Same weights and rounding as [`from_buffer`]; used for numpy input.
pub fn from_rgba_array(input: ArrayView3<u8>) -> Result<GrayscaleImage> {
    let (height, width, channels) = input.dim();
    if channels != CHANNELS {
        return Err(ImageError::InvalidShape {
            what: "channel count",
            expected: CHANNELS,
            actual: channels,
        });
    }

    let mut output = Array2::<u8>::zeros((height, width));
    for y in 0..height {
        for x in 0..width {
            output[[y, x]] = luminosity(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
        }
    }

    Ok(GrayscaleImage::from_array(output))
}
