//! Option validation and resizing, the steps that run before quantization.
//!
//! 1. **Normalize** - decode to 8-bit RGB (done by the caller's `to_rgb8`)
//! 2. **Resize** - proportional scaling to the requested grid width
//!
//! Invalid options never abort a conversion. Each one falls back to a
//! default and yields an [`Adjustment`] that the caller can log.
//!
//! # Example
//!
//! ```
//! use grid_quant::{Adjustment, QuantizeOptions, ResampleFilter};
//!
//! let options = QuantizeOptions::new().width(0).filter("FOO");
//!
//! let (width, adjustment) = options.resolve_width(100, 50);
//! assert_eq!(width, None);
//! assert!(matches!(adjustment, Some(Adjustment::InvalidWidth { .. })));
//!
//! let (filter, adjustment) = options.resolve_filter();
//! assert_eq!(filter, ResampleFilter::Bicubic);
//! assert!(adjustment.is_some());
//! ```

mod options;
mod resize;

pub use options::{Adjustment, QuantizeOptions, MAX_GRID_HEIGHT, MAX_GRID_WIDTH, MIN_COLORS};
pub use resize::{proportional_height, resize_to_width, ResampleFilter, UnknownFilterError};
