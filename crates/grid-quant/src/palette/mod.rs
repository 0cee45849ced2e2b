//! Reference palette types
//!
//! This module provides the named reference palette every quantized pixel
//! ends up in, plus error types for parsing and validation.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, MAX_PALETTE_COLORS, STANDARD_COLOR_NAMES};
