//! Color types and name resolution
//!
//! - [`Rgb`]: byte-exact 8-bit color used throughout the pipeline
//! - [`lookup_color`]: resolve a color name (or hex string) to [`Rgb`]
//!
//! # Example
//!
//! ```
//! use grid_quant::{lookup_color, Rgb};
//!
//! let gold = lookup_color("Gold").unwrap();
//! assert_eq!(gold, Rgb::new(255, 215, 0));
//! assert_eq!(gold.to_hex(), "FFD700");
//! ```

mod named;
mod rgb;

pub use named::lookup_color;
pub use rgb::Rgb;
