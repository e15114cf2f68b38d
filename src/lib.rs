//! graytone
//!
//! Intensity statistics and tone adjustments for 8-bit grayscale images,
//! with optional Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! - **GrayscaleImage**: (height, width) array of `u8` intensities, 0-255
//! - **RGBA buffer**: interleaved 4-byte pixels, row-major, for the display
//!   boundary only (see [`filters::grayscale`])
//!
//! ## Flow
//! RGBA buffer -> [`GrayscaleImage`] -> [`Histogram`] (read-only pass) ->
//! operator pipeline (in-place passes) -> RGBA buffer.
//!
//! The caller owns the image. Histograms borrow it immutably, transforms
//! borrow it mutably, so the two never overlap on the same image.
//!
//! ```
//! use graytone::{recompute, AdjustmentParams, GrayscaleImage};
//!
//! let source = GrayscaleImage::from_rows(&[vec![0u8, 64], vec![128, 255]])?;
//! let params = AdjustmentParams { brighten: 300.0, ..AdjustmentParams::default() };
//! let adjusted = recompute(&source, &params)?;
//! assert_eq!(adjusted.image.get(0, 0), Some(255));
//! # Ok::<(), graytone::ImageError>(())
//! ```

pub mod error;
pub mod filters;
pub mod histogram;
pub mod image;
pub mod params;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{ImageError, Result};
pub use filters::grayscale::{from_buffer, to_buffer};
pub use filters::{apply_transform_list, transform_pixels, PointOperator};
pub use histogram::Histogram;
pub use image::{GrayscaleImage, GrayscaleValue};
pub use params::{recompute, Adjusted, AdjustmentParams};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::ImageError;
    use crate::filters::core::apply_transform_list;
    use crate::filters::grayscale::from_rgba_array;
    use crate::filters::levels_curves;
    use crate::histogram::Histogram;
    use crate::image::GrayscaleImage;
    use crate::params::{recompute, AdjustmentParams};

    fn to_py_err(err: ImageError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn to_image(image: PyReadonlyArray2<'_, u8>) -> GrayscaleImage {
        GrayscaleImage::from_array(image.as_array().to_owned())
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Per-level pixel counts (256 entries) of a 2D uint8 image.
    #[pyfunction]
    pub fn histogram(image: PyReadonlyArray2<'_, u8>) -> Vec<u32> {
        Histogram::compute(&to_image(image)).bins().to_vec()
    }

    /// Normalized cumulative distribution (256 entries, empty for an empty image).
    #[pyfunction]
    pub fn cdf(image: PyReadonlyArray2<'_, u8>) -> Vec<f64> {
        Histogram::compute(&to_image(image)).cdf().to_vec()
    }

    // ========================================================================
    // Adjustments
    // ========================================================================

    /// Brighten, contrast and normalize a 2D uint8 image.
    ///
    /// # Arguments
    /// * `brighten` - Offset added to every value (default 0)
    /// * `contrast` - Multiplier around 128 (default 1)
    /// * `normalized_min` - Output black point (default 0)
    /// * `normalized_max` - Output white point (default 255)
    #[pyfunction]
    #[pyo3(signature = (image, brighten=0.0, contrast=1.0, normalized_min=0.0, normalized_max=255.0))]
    pub fn adjust<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        brighten: f64,
        contrast: f64,
        normalized_min: f64,
        normalized_max: f64,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let params = AdjustmentParams {
            brighten,
            contrast,
            normalized_min_value: normalized_min,
            normalized_max_value: normalized_max,
        };
        let adjusted = recompute(&to_image(image), &params).map_err(to_py_err)?;
        Ok(adjusted.image.into_array().into_pyarray(py))
    }

    /// Histogram-equalize a 2D uint8 image within its observed range.
    #[pyfunction]
    pub fn equalize<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
    ) -> Bound<'py, PyArray2<u8>> {
        let mut img = to_image(image);
        let hist = Histogram::compute(&img);
        if let Some(op) = levels_curves::equalize(&hist) {
            apply_transform_list(&mut img, &[op]);
        }
        img.into_array().into_pyarray(py)
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Convert an (H, W, 4) RGBA uint8 array to (H, W) luminosity.
    #[pyfunction]
    pub fn rgba_to_gray<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let img = from_rgba_array(image.as_array()).map_err(to_py_err)?;
        Ok(img.into_array().into_pyarray(py))
    }

    /// graytone extension module
    #[pymodule]
    pub fn graytone(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(histogram, m)?)?;
        m.add_function(wrap_pyfunction!(cdf, m)?)?;
        m.add_function(wrap_pyfunction!(adjust, m)?)?;
        m.add_function(wrap_pyfunction!(equalize, m)?)?;
        m.add_function(wrap_pyfunction!(rgba_to_gray, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::graytone;
