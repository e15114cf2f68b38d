//! User-adjustable tone parameters and explicit recomputation.
//!
//! The host application owns an [`AdjustmentParams`] value and the source
//! image. Whenever a knob changes it calls [`recompute`] again; nothing here
//! observes changes or keeps global state.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ImageError, Result};
use crate::filters::color_adjust::{brighten, contrast};
use crate::filters::core::{apply_transform_list, PointOperator};
use crate::filters::levels_curves::normalize_from;
use crate::histogram::Histogram;
use crate::image::GrayscaleImage;

/// The four tone knobs, applied as brighten -> contrast -> normalization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentParams {
    /// Offset added to every intensity.
    pub brighten: f64,
    /// Contrast multiplier around 128; 1 leaves the image unchanged.
    pub contrast: f64,
    /// Output black point of the normalization step (0-255).
    pub normalized_min_value: f64,
    /// Output white point of the normalization step (0-255).
    pub normalized_max_value: f64,
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self {
            brighten: 0.0,
            contrast: 1.0,
            normalized_min_value: 0.0,
            normalized_max_value: 255.0,
        }
    }
}

impl AdjustmentParams {
    /// Parse and validate a JSON parameter set. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every knob is finite, contrast is non-negative and the
    /// normalization bounds lie in 0-255.
    pub fn validate(&self) -> Result<()> {
        let knobs = [
            ("brighten", self.brighten),
            ("contrast", self.contrast),
            ("normalized_min_value", self.normalized_min_value),
            ("normalized_max_value", self.normalized_max_value),
        ];
        for (name, value) in knobs {
            if !value.is_finite() {
                return Err(ImageError::InvalidParameter { name, value });
            }
        }

        if self.contrast < 0.0 {
            return Err(ImageError::InvalidParameter {
                name: "contrast",
                value: self.contrast,
            });
        }
        for &(name, value) in &knobs[2..] {
            if !(0.0..=255.0).contains(&value) {
                return Err(ImageError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// True when [`AdjustmentParams::operators`] built from `source` leaves
    /// the image it describes unchanged.
    ///
    /// Brighten must be 0 and contrast 1. The normalization step is a no-op
    /// for an empty or uniform source, or when the observed range already
    /// equals the output bounds.
    pub fn is_identity(&self, source: &Histogram) -> bool {
        if self.brighten != 0.0 || self.contrast != 1.0 {
            return false;
        }
        match source.value_range() {
            None => true,
            Some((min, max)) if min == max => true,
            Some((min, max)) => {
                min as f64 == self.normalized_min_value && max as f64 == self.normalized_max_value
            }
        }
    }

    /// Build the pipeline in its fixed order: brighten, contrast,
    /// normalization.
    ///
    /// The normalization step maps the observed range of `source` onto
    /// `[normalized_min_value, normalized_max_value]`; for an empty or
    /// uniform source it is the identity.
    pub fn operators(&self, source: &Histogram) -> Vec<PointOperator> {
        vec![
            brighten(self.brighten),
            contrast(self.contrast),
            normalize_from(
                source,
                self.normalized_min_value,
                self.normalized_max_value,
            ),
        ]
    }
}

/// Output of one [`recompute`] call.
#[derive(Clone, Debug)]
pub struct Adjusted {
    pub image: GrayscaleImage,
    pub histogram: Histogram,
    pub source_histogram: Histogram,
}

/// Apply `params` to a copy of `source` and rebuild the statistics.
///
/// The source image is only borrowed; the adjusted copy and both histograms
/// are returned.
pub fn recompute(source: &GrayscaleImage, params: &AdjustmentParams) -> Result<Adjusted> {
    params.validate()?;

    let source_histogram = Histogram::compute(source);
    let mut image = source.clone();
    apply_transform_list(&mut image, &params.operators(&source_histogram));
    let histogram = Histogram::compute(&image);

    debug!(
        "recompute {}x{}: {:?}, range {:?} -> {:?}",
        image.width(),
        image.height(),
        params,
        source_histogram.value_range(),
        histogram.value_range()
    );

    Ok(Adjusted {
        image,
        histogram,
        source_histogram,
    })
}
