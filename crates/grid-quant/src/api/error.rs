//! Error type for the quantization pipeline.

use thiserror::Error;

use crate::color::Rgb;
use crate::palette::PaletteError;

/// Errors a conversion cannot recover from.
///
/// Bad option values are not errors: they resolve to defaults and are
/// reported as [`Adjustment`](crate::Adjustment)s instead.
///
/// # Example
///
/// ```
/// use grid_quant::{Palette, QuantizeError};
///
/// fn custom_palette() -> Result<Palette, QuantizeError> {
///     Ok(Palette::from_names(&["White", "Black", "Red"])?)
/// }
/// assert_eq!(custom_palette().unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantizeError {
    /// The source image has no pixels.
    #[error("image is empty")]
    EmptyImage,
    /// The indexed image would need more slots than it can hold.
    #[error("image has more than {limit} distinct colors")]
    TooManyColors {
        /// Slot capacity
        limit: usize,
    },
    /// A color reached the legend without being snapped to the palette.
    #[error("color {color} is not in the reference palette")]
    ColorNotInPalette {
        /// The offending color
        color: Rgb,
    },
    /// The reference palette could not be built.
    #[error(transparent)]
    Palette(#[from] PaletteError),
}
