//! Output types: the indexed image and its legend.
//!
//! - [`QuantizedImage`]: per-pixel slots into an image-local color table
//! - [`Legend`]: worksheet numbers for every non-white slot

mod legend;
mod quantized_image;

pub use legend::{Legend, LegendEntry};
pub use quantized_image::QuantizedImage;
