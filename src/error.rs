//! Error type shared by image construction, the RGBA bridge and parameters.

/// Errors surfaced synchronously to the caller.
///
/// Every variant is a data-contract violation; nothing here is transient.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Ragged rows or a buffer whose length does not match its dimensions.
    #[error("invalid {what}: expected length {expected}, got {actual}")]
    InvalidShape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Dimensions whose element count does not fit in `usize`.
    #[error("dimensions {height}x{width} with {channels} channel(s) overflow the addressable size")]
    DimensionsOverflow {
        height: usize,
        width: usize,
        channels: usize,
    },
    /// Intensity outside 0..=255 found while ingesting rows.
    #[error("intensity {value} at (x={x}, y={y}) is outside 0..=255")]
    OutOfRange { x: usize, y: usize, value: i64 },
    #[error("parameter `{name}` has invalid value {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ImageError>;
