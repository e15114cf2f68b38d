//! Intensity histogram and cumulative distribution of a grayscale image.
//!
//! A [`Histogram`] is a snapshot: it is built once from an image, never
//! updated, and rebuilt whenever the image changes.
//!
//! ## Empty images
//!
//! For an image without pixels the bins stay zero, `min_value()` keeps the
//! sentinel [`MIN_UNSET`] (256), `max_value()` keeps [`MAX_UNSET`] (-1) and the
//! CDF is zero-length. The checked accessors [`Histogram::value_range`] and
//! [`Histogram::rescale_cdf`] return `None` instead of doing sentinel
//! arithmetic.

use log::debug;
use ndarray::{ArrayView1, Axis};
use rayon::prelude::*;

use crate::image::GrayscaleImage;

/// Number of intensity levels of an 8-bit image.
pub const LEVELS: usize = 256;

/// `min_value()` of a histogram built from an empty image.
pub const MIN_UNSET: i32 = 256;

/// `max_value()` of a histogram built from an empty image.
pub const MAX_UNSET: i32 = -1;

/// Running counts for one slice of the image.
#[derive(Clone)]
struct Accumulator {
    bins: [u32; LEVELS],
    min: i32,
    max: i32,
    count: usize,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            bins: [0; LEVELS],
            min: MIN_UNSET,
            max: MAX_UNSET,
            count: 0,
        }
    }

    #[inline]
    fn push_row(&mut self, row: ArrayView1<'_, u8>) {
        for &v in row.iter() {
            self.bins[v as usize] += 1;
            let v = v as i32;
            if v < self.min {
                self.min = v;
            }
            if v > self.max {
                self.max = v;
            }
        }
        self.count += row.len();
    }

    fn merge(mut self, other: Self) -> Self {
        for (dst, src) in self.bins.iter_mut().zip(other.bins.iter()) {
            *dst += *src;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.count += other.count;
        self
    }
}

/// Per-level counts, observed extremes and normalized CDF of one image.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    bins: [u32; LEVELS],
    min_value: i32,
    max_value: i32,
    cdf: Vec<f64>,
    pixel_count: usize,
}

impl Histogram {
    /// Build the histogram in a single pass over every pixel.
    pub fn compute(image: &GrayscaleImage) -> Self {
        let mut acc = Accumulator::new();
        for row in image.view().axis_iter(Axis(0)) {
            acc.push_row(row);
        }
        Self::finish(acc)
    }

    /// Same result as [`Histogram::compute`], with rows counted in parallel
    /// and the partial counts merged.
    pub fn compute_par(image: &GrayscaleImage) -> Self {
        let acc = image
            .view()
            .axis_iter(Axis(0))
            .into_par_iter()
            .fold(Accumulator::new, |mut acc, row| {
                acc.push_row(row);
                acc
            })
            .reduce(Accumulator::new, Accumulator::merge);
        Self::finish(acc)
    }

    fn finish(acc: Accumulator) -> Self {
        let cdf = if acc.count == 0 {
            Vec::new()
        } else {
            cumulative_distribution(&acc.bins, acc.count)
        };

        debug!(
            "histogram: {} pixels, range {}..={}",
            acc.count, acc.min, acc.max
        );

        Self {
            bins: acc.bins,
            min_value: acc.min,
            max_value: acc.max,
            cdf,
            pixel_count: acc.count,
        }
    }

    /// The 256 intensity levels in bin order.
    pub fn labels() -> impl Iterator<Item = u8> {
        0..=u8::MAX
    }

    #[inline]
    pub fn bins(&self) -> &[u32; LEVELS] {
        &self.bins
    }

    #[inline]
    pub fn count(&self, level: u8) -> u32 {
        self.bins[level as usize]
    }

    /// Smallest observed intensity, or [`MIN_UNSET`] for an empty image.
    #[inline]
    pub fn min_value(&self) -> i32 {
        self.min_value
    }

    /// Largest observed intensity, or [`MAX_UNSET`] for an empty image.
    #[inline]
    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    /// Observed `(min, max)` intensities; `None` for an empty image.
    pub fn value_range(&self) -> Option<(u8, u8)> {
        if self.is_empty() {
            return None;
        }
        Some((self.min_value as u8, self.max_value as u8))
    }

    /// Normalized cumulative distribution; empty for an empty image.
    #[inline]
    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixel_count == 0
    }

    /// Largest bin count (0 for an empty image). Handy for scaling plots.
    pub fn peak(&self) -> u32 {
        self.bins.iter().copied().max().unwrap_or(0)
    }

    /// The CDF linearly remapped into the observed intensity range:
    /// `cdf[i] * (max - min) + min`.
    ///
    /// This is the equalization curve used by
    /// [`equalize`](crate::filters::levels_curves::equalize).
    pub fn rescale_cdf(&self) -> Option<Vec<f64>> {
        let (min, max) = self.value_range()?;
        let (min, max) = (min as f64, max as f64);
        Some(self.cdf.iter().map(|&y| y * (max - min) + min).collect())
    }
}

/// Running sum of the bins divided by the pixel count.
fn cumulative_distribution(bins: &[u32; LEVELS], total: usize) -> Vec<f64> {
    let total = total as f64;
    let mut accumulated = 0u64;

    bins.iter()
        .map(|&count| {
            accumulated += count as u64;
            accumulated as f64 / total
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn image(rows: &[Vec<u8>]) -> GrayscaleImage {
        GrayscaleImage::from_rows(rows).unwrap()
    }

    #[test]
    fn test_two_by_two_scenario() {
        let img = image(&[vec![0, 64], vec![128, 255]]);
        let hist = Histogram::compute(&img);

        for level in 0..LEVELS {
            let expected = u32::from(matches!(level, 0 | 64 | 128 | 255));
            assert_eq!(hist.bins()[level], expected, "bin {}", level);
        }
        assert_eq!(hist.min_value(), 0);
        assert_eq!(hist.max_value(), 255);

        let cdf = hist.cdf();
        assert_eq!(cdf.len(), LEVELS);
        assert_abs_diff_eq!(cdf[0], 0.25);
        assert_abs_diff_eq!(cdf[63], 0.25);
        assert_abs_diff_eq!(cdf[64], 0.5);
        assert_abs_diff_eq!(cdf[127], 0.5);
        assert_abs_diff_eq!(cdf[128], 0.75);
        assert_abs_diff_eq!(cdf[254], 0.75);
        assert_abs_diff_eq!(cdf[255], 1.0);
    }

    #[test]
    fn test_empty_image_keeps_sentinels() {
        let hist = Histogram::compute(&GrayscaleImage::new(0, 0));

        assert!(hist.is_empty());
        assert_eq!(hist.min_value(), MIN_UNSET);
        assert_eq!(hist.max_value(), MAX_UNSET);
        assert!(hist.cdf().is_empty());
        assert_eq!(hist.value_range(), None);
        assert_eq!(hist.rescale_cdf(), None);
        assert_eq!(hist.peak(), 0);
        assert!(hist.bins().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_all_zero_image() {
        let hist = Histogram::compute(&GrayscaleImage::new(3, 4));

        assert_eq!(hist.min_value(), 0);
        assert_eq!(hist.max_value(), 0);
        assert_eq!(hist.count(0), 12);
        assert_eq!(hist.peak(), 12);
        assert!(hist.cdf().iter().all(|&c| (c - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_rescale_cdf_maps_into_observed_range() {
        let img = image(&[vec![50, 100], vec![100, 150]]);
        let hist = Histogram::compute(&img);
        let rescaled = hist.rescale_cdf().unwrap();

        assert_eq!(rescaled.len(), LEVELS);
        // Below the darkest pixel the CDF is 0, so the curve starts at min.
        assert_abs_diff_eq!(rescaled[0], 50.0);
        assert_abs_diff_eq!(rescaled[50], 50.0 + 0.25 * 100.0);
        assert_abs_diff_eq!(rescaled[100], 50.0 + 0.75 * 100.0);
        assert_abs_diff_eq!(rescaled[255], 150.0);
    }

    #[test]
    fn test_rescale_cdf_uniform_image() {
        let mut img = GrayscaleImage::new(2, 2);
        img.view_mut().fill(77);
        let hist = Histogram::compute(&img);

        let rescaled = hist.rescale_cdf().unwrap();
        assert!(rescaled.iter().all(|&v| v == 77.0));
    }

    #[test]
    fn test_labels_cover_all_levels() {
        let labels: Vec<u8> = Histogram::labels().collect();
        assert_eq!(labels.len(), LEVELS);
        assert_eq!(labels[0], 0);
        assert_eq!(labels[255], 255);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let data: Vec<u8> = (0..37 * 23).map(|i| ((i * 31) % 251) as u8).collect();
        let img = GrayscaleImage::from_vec(37, 23, data).unwrap();

        assert_eq!(Histogram::compute(&img), Histogram::compute_par(&img));
        let empty = GrayscaleImage::new(0, 5);
        assert_eq!(Histogram::compute(&empty), Histogram::compute_par(&empty));
    }
}
