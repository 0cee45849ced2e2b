//! The two quantization stages.
//!
//! 1. [`reduce_colors`] - coverage-first median cut down to N colors
//! 2. [`snap_to_palette`] - nearest-color mapping onto the reference palette
//!
//! Order matters. Reducing first picks the N colors that cover the largest
//! areas of the source; snapping afterwards guarantees every pixel is a
//! palette entry. Snapping alone (N = 32) skips the first stage.

mod coverage;
mod histogram;
mod snap;

pub use coverage::{coverage_palette, reduce_colors};
pub use histogram::Histogram;
pub use snap::snap_to_palette;
