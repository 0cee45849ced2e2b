//! Errors raised while building a reference palette.

use std::num::ParseIntError;

use thiserror::Error;

/// A `#RGB` / `#RRGGBB` string that is not a color.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Not 3 or 6 digits after the '#'
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// A digit outside 0-9, A-F
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette construction.
///
/// Every variant is a configuration problem: the palette cannot be built
/// and the run has to stop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No names given
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// More colors than a worksheet legend supports
    #[error("palette has {count} colors (max {max})")]
    TooManyColors {
        /// Number of names supplied
        count: usize,
        /// Upper bound
        max: usize,
    },
    /// A name the color lookup does not know
    #[error("unknown color name '{name}' at index {index}")]
    UnknownColor {
        /// Position in the input list
        index: usize,
        /// The unresolvable name
        name: String,
    },
    /// Two names resolved to the same RGB value
    #[error("duplicate color found at index {index}")]
    DuplicateColor {
        /// Position of the second occurrence
        index: usize,
    },
}
