//! Point-operator pipeline.
//!
//! A point operator maps `(value, x, y)` to a new intensity, where `x` is the
//! column and `y` the row of the pixel. Operators return an unclamped `f64`;
//! the pipeline rounds to nearest and clamps into `0..=255` exactly once per
//! pixel per operator ([`clamp_gray`]), so individual operators never need to.
//!
//! Operators run in full successive passes: every pixel sees operator `n`
//! before any pixel sees operator `n + 1`. An operator that reads the current
//! value therefore observes the output of all operators before it.

use log::trace;
use ndarray::Axis;
use rayon::prelude::*;

use crate::image::GrayscaleImage;

/// Boxed per-pixel transform, composable into an ordered pipeline.
pub type PointOperator = Box<dyn Fn(u8, usize, usize) -> f64 + Send + Sync>;

/// Round to nearest (half away from zero) and clamp into `0..=255`.
///
/// NaN maps to 0.
#[inline]
pub fn clamp_gray(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Apply one operator to every pixel of `image`, in place.
pub fn transform_pixels<F>(image: &mut GrayscaleImage, op: F)
where
    F: Fn(u8, usize, usize) -> f64,
{
    for (y, mut row) in image.view_mut().axis_iter_mut(Axis(0)).enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            *px = clamp_gray(op(*px, x, y));
        }
    }
}

/// Row-parallel [`transform_pixels`]. Produces the same result.
pub fn transform_pixels_par<F>(image: &mut GrayscaleImage, op: F)
where
    F: Fn(u8, usize, usize) -> f64 + Sync,
{
    image
        .view_mut()
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for (x, px) in row.iter_mut().enumerate() {
                *px = clamp_gray(op(*px, x, y));
            }
        });
}

/// Apply `operators` in order, one full pass each.
///
/// An empty list leaves the image untouched.
pub fn apply_transform_list(image: &mut GrayscaleImage, operators: &[PointOperator]) {
    for (i, op) in operators.iter().enumerate() {
        trace!("pipeline pass {}/{}", i + 1, operators.len());
        transform_pixels(image, op.as_ref());
    }
}

/// Row-parallel [`apply_transform_list`]. Passes stay sequential.
pub fn apply_transform_list_par(image: &mut GrayscaleImage, operators: &[PointOperator]) {
    for (i, op) in operators.iter().enumerate() {
        trace!("parallel pipeline pass {}/{}", i + 1, operators.len());
        transform_pixels_par(image, op.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::color_adjust::{brighten, contrast};

    fn image(rows: &[Vec<u8>]) -> GrayscaleImage {
        GrayscaleImage::from_rows(rows).unwrap()
    }

    #[test]
    fn test_clamp_gray() {
        assert_eq!(clamp_gray(-12.0), 0);
        assert_eq!(clamp_gray(500.0), 255);
        assert_eq!(clamp_gray(127.5), 128);
        assert_eq!(clamp_gray(127.49), 127);
        assert_eq!(clamp_gray(f64::NAN), 0);
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let original = image(&[vec![0, 17, 250], vec![3, 128, 255]]);
        let mut img = original.clone();

        apply_transform_list(&mut img, &[]);

        assert_eq!(img, original);
    }

    #[test]
    fn test_operator_sees_position() {
        let mut img = GrayscaleImage::new(2, 3);
        transform_pixels(&mut img, |_, x, y| (10 * y + x) as f64);

        assert_eq!(img.to_rows(), vec![vec![0, 1, 2], vec![10, 11, 12]]);
    }

    #[test]
    fn test_passes_are_successive() {
        // The second operator reads the first one's output, not the original.
        let mut img = image(&[vec![10, 20]]);
        let ops: Vec<PointOperator> = vec![
            Box::new(|v: u8, _, _| v as f64 * 2.0),
            Box::new(|v: u8, _, _| v as f64 + 1.0),
        ];

        apply_transform_list(&mut img, &ops);

        assert_eq!(img.to_rows(), vec![vec![21, 41]]);
    }

    #[test]
    fn test_order_sensitivity() {
        let original = image(&[vec![250, 128, 5]]);

        let mut brighten_first = original.clone();
        apply_transform_list(&mut brighten_first, &[brighten(10.0), contrast(2.0)]);

        let mut contrast_first = original.clone();
        apply_transform_list(&mut contrast_first, &[contrast(2.0), brighten(10.0)]);

        assert_ne!(brighten_first, contrast_first);
        // 250 saturates at the top either way.
        assert_eq!(brighten_first.get(0, 0), Some(255));
        assert_eq!(contrast_first.get(0, 0), Some(255));
        assert_eq!(brighten_first.get(1, 0), Some(148));
        assert_eq!(contrast_first.get(1, 0), Some(138));
        // Clamped to 0 by contrast, then lifted off the floor by brighten.
        assert_eq!(brighten_first.get(2, 0), Some(0));
        assert_eq!(contrast_first.get(2, 0), Some(10));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let data: Vec<u8> = (0..19 * 41).map(|i| (i % 256) as u8).collect();
        let original = GrayscaleImage::from_vec(19, 41, data).unwrap();
        let ops = || -> Vec<PointOperator> {
            vec![
                brighten(-20.0),
                contrast(1.7),
                Box::new(|v: u8, x: usize, y: usize| v as f64 + ((x + y) % 3) as f64),
            ]
        };

        let mut seq = original.clone();
        apply_transform_list(&mut seq, &ops());
        let mut par = original;
        apply_transform_list_par(&mut par, &ops());

        assert_eq!(seq, par);
    }

    #[test]
    fn test_transform_empty_image() {
        let mut img = GrayscaleImage::new(0, 0);
        transform_pixels(&mut img, |v, _, _| v as f64 + 1.0);
        transform_pixels_par(&mut img, |v, _, _| v as f64 + 1.0);
        assert!(img.is_empty());
    }
}
