//! Point operators and the pipeline that applies them.
//!
//! ## Image Format
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W) | u8 | Single luminance channel, 0-255 |
//! | RGBA8 buffer | H * W * 4 | u8 | Interleaved R, G, B, A (bridge only) |
//!
//! ## Architecture
//!
//! - **Operators** are boxed closures `(value, x, y) -> f64`; they never clamp.
//! - **The pipeline** runs one full in-place pass per operator, in order, and
//!   rounds/clamps every result into 0-255.
//! - **Parallel variants** split passes over rows with rayon and give
//!   identical results.
//!
//! ## Operator Categories
//!
//! - **Tone**: brighten, contrast, invert ([`color_adjust`])
//! - **Histogram-driven**: normalize, equalize ([`levels_curves`])
//! - **Bridge**: RGBA buffer <-> grayscale ([`grayscale`])

pub mod core;
pub mod color_adjust;
pub mod levels_curves;
pub mod grayscale;

pub use self::core::{
    apply_transform_list, apply_transform_list_par, clamp_gray, transform_pixels,
    transform_pixels_par, PointOperator,
};
