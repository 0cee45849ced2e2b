#![allow(clippy::module_inception)]

//! grid-quant: turn pictures into numbered color grids
//!
//! This library reduces an image to a small set of named colors so it can be
//! printed as a color-by-number worksheet: one cell per pixel, one legend
//! number per color, white left blank.
//!
//! # Quick Start
//!
//! The [`Quantizer`] builder is the primary entry point:
//!
//! ```
//! use grid_quant::{Palette, Quantizer};
//! use image::RgbImage;
//!
//! let img = RgbImage::from_fn(60, 34, |x, _| {
//!     if x < 30 { image::Rgb([20, 20, 20]) } else { image::Rgb([255, 255, 255]) }
//! });
//!
//! let result = Quantizer::new(Palette::standard())
//!     .width(20)
//!     .filter("nearest")
//!     .colors(4)
//!     .quantize_rgb(img)
//!     .unwrap();
//!
//! assert_eq!(result.image.width(), 20);
//! assert_eq!(result.image.height(), 11);
//! // Black gets number 1, white gets no number at all
//! assert_eq!(result.legend.len(), 1);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! any pixel format
//!     |
//!     v
//! RGB, 8 bits per channel      (alpha dropped)
//!     |
//!     v
//! [Resize to width]            (height in proportion, chosen filter)
//!     |
//!     v
//! [Coverage reduction]         (median cut down to N colors, skipped for 32)
//!     |
//!     v
//! [Snap to palette]            (nearest color, no dithering)
//!     |
//!     v
//! QuantizedImage + Legend      (first-seen slots, white unnumbered)
//! ```
//!
//! Reduction runs before snapping on purpose. The reducer keeps the colors
//! covering the largest areas, so big regions of the picture survive even
//! with a small budget. Snapping afterwards guarantees that every cell maps
//! to a named palette color.
//!
//! # Reference Palette
//!
//! [`Palette::standard()`] holds 32 named colors with white at position 0
//! and black at position 1. The position of a color selects its name in a
//! translation file, so the order is part of the contract.
//!
//! # Recoverable Options
//!
//! Width, filter and color count are validated but never fatal. An invalid
//! value falls back to its default and is reported as an [`Adjustment`]
//! on the [`Quantization`] (and logged through `tracing`).

pub mod api;
pub mod color;
pub mod output;
pub mod palette;
pub mod preprocess;
pub mod quantize;


pub use api::{Quantization, QuantizeError, Quantizer};
pub use color::{lookup_color, Rgb};
pub use output::{Legend, LegendEntry, QuantizedImage};
pub use palette::{
    Palette, PaletteError, ParseColorError, MAX_PALETTE_COLORS, STANDARD_COLOR_NAMES,
};
pub use preprocess::{
    proportional_height, resize_to_width, Adjustment, QuantizeOptions, ResampleFilter,
    UnknownFilterError, MAX_GRID_HEIGHT, MAX_GRID_WIDTH, MIN_COLORS,
};
pub use quantize::{reduce_colors, snap_to_palette, Histogram};
