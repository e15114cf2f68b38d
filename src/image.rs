//! Single-channel 8-bit image.
//!
//! Pixels are stored row-major in an `Array2<u8>` of shape `(height, width)`,
//! so the `0..=255` domain and the rectangular shape hold by construction.
//! Untrusted input goes through [`GrayscaleImage::from_rows`] or
//! [`GrayscaleImage::from_vec`], which reject malformed data before anything
//! is built.

use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use crate::error::{ImageError, Result};

/// Intensity of one pixel.
pub type GrayscaleValue = u8;

/// Number of elements in a `height x width x channels` buffer.
///
/// Fails with `DimensionsOverflow` instead of wrapping when the product does
/// not fit in `usize`.
pub(crate) fn checked_len(height: usize, width: usize, channels: usize) -> Result<usize> {
    height
        .checked_mul(width)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or(ImageError::DimensionsOverflow {
            height,
            width,
            channels,
        })
}

/// Owned grayscale image with shape `(height, width)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayscaleImage {
    pixels: Array2<u8>,
}

impl GrayscaleImage {
    /// Zero-filled image.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            pixels: Array2::zeros((height, width)),
        }
    }

    pub fn from_array(pixels: Array2<u8>) -> Self {
        Self { pixels }
    }

    /// Build from a flat row-major vector of `height * width` values.
    pub fn from_vec(height: usize, width: usize, data: Vec<u8>) -> Result<Self> {
        let expected = checked_len(height, width, 1)?;
        if data.len() != expected {
            return Err(ImageError::InvalidShape {
                what: "pixel data",
                expected,
                actual: data.len(),
            });
        }
        let pixels =
            Array2::from_shape_vec((height, width), data).map_err(|_| ImageError::InvalidShape {
                what: "pixel data",
                expected,
                actual: expected,
            })?;
        Ok(Self { pixels })
    }

    /// Build from nested rows of any integer type.
    ///
    /// All rows must have the length of the first one and every value must
    /// lie in `0..=255`. Zero rows yield the empty `0 x 0` image.
    pub fn from_rows<T>(rows: &[Vec<T>]) -> Result<Self>
    where
        T: Copy + Into<i64>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            return Err(ImageError::InvalidShape {
                what: "row",
                expected: width,
                actual: row.len(),
            });
        }

        let mut data = Vec::with_capacity(checked_len(height, width, 1)?);
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                let value: i64 = v.into();
                let gray = u8::try_from(value).map_err(|_| ImageError::OutOfRange { x, y, value })?;
                data.push(gray);
            }
        }

        Self::from_vec(height, width, data)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True when the image holds no pixels (height or width is zero).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Value at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.pixels.get((y, x)).copied()
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.pixels.view()
    }

    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, u8> {
        self.pixels.view_mut()
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.pixels.rows().into_iter().map(|r| r.to_vec()).collect()
    }

    pub fn into_array(self) -> Array2<u8> {
        self.pixels
    }
}

impl From<Array2<u8>> for GrayscaleImage {
    fn from(pixels: Array2<u8>) -> Self {
        Self::from_array(pixels)
    }
}
