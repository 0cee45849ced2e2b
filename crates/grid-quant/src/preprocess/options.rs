//! Pipeline options and their validation.
//!
//! Options arrive unvalidated (straight from a command line or config file).
//! Invalid values are never fatal: each one resolves to a documented default
//! and produces an [`Adjustment`] describing what was changed.

use std::fmt;

use super::resize::{proportional_height_wide, ResampleFilter};
use crate::palette::MAX_PALETTE_COLORS;

/// Smallest color count the reducer accepts.
pub const MIN_COLORS: i64 = 2;

/// Widest grid that still leaves room for the legend on one worksheet
/// (16,384 columns minus the gap and the five caption columns).
pub const MAX_GRID_WIDTH: u32 = 16_384 - 6;

/// Tallest grid a worksheet holds.
pub const MAX_GRID_HEIGHT: u32 = 1_048_576;

/// Raw options for one conversion.
///
/// # Defaults
///
/// - Width: none (keep the source width)
/// - Filter: none (bicubic)
/// - Colors: 32 (no reduction, snap straight to the reference palette)
/// - Upscaling: disabled
///
/// # Example
///
/// ```
/// use grid_quant::QuantizeOptions;
///
/// let options = QuantizeOptions::new()
///     .width(20)
///     .filter("lanczos")
///     .colors(5);
/// assert_eq!(options.width, Some(20));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizeOptions {
    /// Requested grid width in cells (None = source width).
    pub width: Option<i64>,

    /// Resampling filter name, matched case-insensitively.
    pub filter: Option<String>,

    /// Number of colors, white included. Valid range is 2..=32.
    pub colors: i64,

    /// Allow a width larger than the source image.
    pub allow_upscale: bool,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            width: None,
            filter: None,
            colors: MAX_PALETTE_COLORS as i64,
            allow_upscale: false,
        }
    }
}

impl QuantizeOptions {
    /// Create new options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target width.
    #[inline]
    pub fn width(mut self, width: i64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the resampling filter by name.
    #[inline]
    pub fn filter(mut self, name: impl Into<String>) -> Self {
        self.filter = Some(name.into());
        self
    }

    /// Set the color count.
    #[inline]
    pub fn colors(mut self, colors: i64) -> Self {
        self.colors = colors;
        self
    }

    /// Allow or forbid scaling up.
    #[inline]
    pub fn allow_upscale(mut self, enabled: bool) -> Self {
        self.allow_upscale = enabled;
        self
    }

    /// Resolve the filter name. Unknown names fall back to bicubic.
    pub fn resolve_filter(&self) -> (ResampleFilter, Option<Adjustment>) {
        match self.filter.as_deref() {
            None => (ResampleFilter::default(), None),
            Some(name) => match name.parse() {
                Ok(filter) => (filter, None),
                Err(_) => (
                    ResampleFilter::default(),
                    Some(Adjustment::UnknownFilter {
                        name: name.to_string(),
                    }),
                ),
            },
        }
    }

    /// Resolve the target width against the source size.
    ///
    /// Returns the width to scale to, or `None` when the image keeps its
    /// size. A width of zero or less, or one not smaller than the source
    /// (unless upscaling is allowed), is skipped with an adjustment. So is
    /// a width whose grid would not fit on a worksheet, upscaling or not.
    pub fn resolve_width(
        &self,
        source_width: u32,
        source_height: u32,
    ) -> (Option<u32>, Option<Adjustment>) {
        let Some(requested) = self.width else {
            return (None, None);
        };

        let too_wide = !self.allow_upscale && requested >= source_width as i64;
        if requested < 1 || too_wide {
            return (
                None,
                Some(Adjustment::InvalidWidth {
                    requested,
                    source_width,
                }),
            );
        }

        if requested > MAX_GRID_WIDTH as i64 {
            return (None, Some(Adjustment::GridTooLarge { requested }));
        }
        let width = requested as u32;
        if proportional_height_wide(source_width, source_height, width) > MAX_GRID_HEIGHT as u64 {
            return (None, Some(Adjustment::GridTooLarge { requested }));
        }

        (Some(width), None)
    }

    /// Resolve the color count.
    ///
    /// Returns the count to reduce to, or `None` when the image snaps
    /// straight to the full reference palette (32 colors, or any count
    /// outside 2..=32).
    pub fn resolve_colors(&self) -> (Option<usize>, Option<Adjustment>) {
        let max = MAX_PALETTE_COLORS as i64;
        if self.colors < MIN_COLORS || self.colors > max {
            return (
                None,
                Some(Adjustment::ColorCountOutOfRange {
                    requested: self.colors,
                }),
            );
        }
        if self.colors == max {
            return (None, None);
        }
        (Some(self.colors as usize), None)
    }
}

/// A recoverable option problem and the default chosen instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adjustment {
    /// Width was not usable; the image keeps its size.
    InvalidWidth {
        /// Width as requested
        requested: i64,
        /// Width of the (decoded) source image
        source_width: u32,
    },
    /// Width would give a grid larger than a worksheet; the image keeps
    /// its size.
    GridTooLarge {
        /// Width as requested
        requested: i64,
    },
    /// Filter name not in the table; bicubic used instead.
    UnknownFilter {
        /// Name as requested
        name: String,
    },
    /// Color count outside 2..=32; the full palette is used instead.
    ColorCountOutOfRange {
        /// Count as requested
        requested: i64,
    },
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::InvalidWidth {
                requested,
                source_width,
            } => write!(
                f,
                "invalid width {} for a {} pixel wide image, scaling down will not be done",
                requested, source_width
            ),
            Adjustment::GridTooLarge { requested } => write!(
                f,
                "width {} gives a grid larger than a worksheet holds ({} x {} cells), \
                 scaling will not be done",
                requested, MAX_GRID_WIDTH, MAX_GRID_HEIGHT
            ),
            Adjustment::UnknownFilter { name } => write!(
                f,
                "unknown resample filter '{}', using {}",
                name,
                ResampleFilter::default()
            ),
            Adjustment::ColorCountOutOfRange { requested } => write!(
                f,
                "invalid number of colors {}, it should be between {} and {} inclusive; \
                 {} standard colors will be used instead",
                requested, MIN_COLORS, MAX_PALETTE_COLORS, MAX_PALETTE_COLORS
            ),
        }
    }
}
