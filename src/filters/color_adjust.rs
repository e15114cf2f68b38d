//! Tone adjustment operators: Brighten, Contrast, Invert.
//!
//! These are pixel-wise operations that don't require spatial context.
//! Each constructor returns a [`PointOperator`] to be placed in a pipeline;
//! rounding and clamping to 0-255 happen in the pipeline.

use super::core::PointOperator;

/// Midpoint around which contrast scales.
pub const CONTRAST_PIVOT: f64 = 128.0;

// ============================================================================
// Brighten
// ============================================================================

/// Shift every intensity by a constant offset.
///
/// # Arguments
/// * `amount` - Offset added to each value, in intensity units (0 = no change)
///
/// # Returns
/// Operator computing `v + amount`
pub fn brighten(amount: f64) -> PointOperator {
    Box::new(move |v: u8, _, _| v as f64 + amount)
}

// ============================================================================
// Contrast
// ============================================================================

/// Scale intensities away from (or toward) the midpoint.
///
/// # Arguments
/// * `factor` - Contrast multiplier: 0 (flat gray) .. 1 (no change) .. >1 (stronger)
///
/// # Returns
/// Operator computing `(v - 128) * factor + 128`
pub fn contrast(factor: f64) -> PointOperator {
    Box::new(move |v: u8, _, _| (v as f64 - CONTRAST_PIVOT) * factor + CONTRAST_PIVOT)
}

// ============================================================================
// Invert
// ============================================================================

/// Photographic negative: `255 - v`.
pub fn invert() -> PointOperator {
    Box::new(|v: u8, _, _| 255.0 - v as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::core::{apply_transform_list, transform_pixels};
    use crate::image::GrayscaleImage;

    fn gradient() -> GrayscaleImage {
        let data: Vec<u8> = (0..=255).collect();
        GrayscaleImage::from_vec(16, 16, data).unwrap()
    }

    // ========================================================================
    // Brighten Tests
    // ========================================================================

    #[test]
    fn test_brighten_clamps_at_white() {
        let mut img = GrayscaleImage::from_rows(&[vec![200u8]]).unwrap();

        apply_transform_list(&mut img, &[brighten(300.0)]);

        assert_eq!(img.get(0, 0), Some(255));
    }

    #[test]
    fn test_brighten_clamps_at_black() {
        let mut img = GrayscaleImage::from_rows(&[vec![20u8, 100]]).unwrap();

        apply_transform_list(&mut img, &[brighten(-50.0)]);

        assert_eq!(img.to_rows(), vec![vec![0, 50]]);
    }

    #[test]
    fn test_brighten_zero_is_identity() {
        let original = gradient();
        let mut img = original.clone();

        transform_pixels(&mut img, brighten(0.0));

        assert_eq!(img, original);
    }

    // ========================================================================
    // Contrast Tests
    // ========================================================================

    #[test]
    fn test_contrast_one_is_identity() {
        let original = gradient();
        let mut img = original.clone();

        apply_transform_list(&mut img, &[contrast(1.0)]);

        assert_eq!(img, original);
    }

    #[test]
    fn test_contrast_zero_flattens_to_pivot() {
        let mut img = gradient();

        apply_transform_list(&mut img, &[contrast(0.0)]);

        assert!(img.view().iter().all(|&v| v == 128));
    }

    #[test]
    fn test_contrast_stretch() {
        let mut img = GrayscaleImage::from_rows(&[vec![100u8, 128, 150, 250]]).unwrap();

        apply_transform_list(&mut img, &[contrast(2.0)]);

        // (100-128)*2+128 = 72, (150-128)*2+128 = 172, 250 saturates
        assert_eq!(img.to_rows(), vec![vec![72, 128, 172, 255]]);
    }

    #[test]
    fn test_contrast_rounds_to_nearest() {
        let mut img = GrayscaleImage::from_rows(&[vec![129u8, 131]]).unwrap();

        apply_transform_list(&mut img, &[contrast(1.5)]);

        // 129.5 -> 130, 132.5 -> 133
        assert_eq!(img.to_rows(), vec![vec![130, 133]]);
    }

    // ========================================================================
    // Invert Tests
    // ========================================================================

    #[test]
    fn test_invert() {
        let mut img = GrayscaleImage::from_rows(&[vec![0u8, 100, 255]]).unwrap();

        apply_transform_list(&mut img, &[invert()]);

        assert_eq!(img.to_rows(), vec![vec![255, 155, 0]]);
    }

    #[test]
    fn test_invert_twice_is_identity() {
        let original = gradient();
        let mut img = original.clone();

        apply_transform_list(&mut img, &[invert(), invert()]);

        assert_eq!(img, original);
    }
}
