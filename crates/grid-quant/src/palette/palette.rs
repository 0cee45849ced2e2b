//! Named reference palette with exact and nearest-color matching.
//!
//! The palette is built once from an ordered list of color names and then
//! shared read-only by every conversion. Positions are significant: the
//! legend refers to colors by their index in this list.

use std::collections::HashSet;

use super::error::PaletteError;
use crate::color::{lookup_color, Rgb};

/// Upper bound on palette entries. A legend with more colors than this is
/// not something a child can reasonably color in.
pub const MAX_PALETTE_COLORS: usize = 32;

/// The standard 32 worksheet colors, in legend order.
///
/// White comes first; it is the paper color and never appears in a legend.
pub const STANDARD_COLOR_NAMES: [&str; MAX_PALETTE_COLORS] = [
    "White",
    "Black",
    "Grey",
    "Silver",
    "Red",
    "Lime",
    "Blue",
    "Cyan",
    "Yellow",
    "Magenta",
    "Purple",
    "Green",
    "Maroon",
    "Olive",
    "Navy",
    "Teal",
    "Orange",
    "Brown",
    "Pink",
    "Chocolate",
    "Dark grey",
    "Sky blue",
    "Dark green",
    "Dark magenta",
    "Gold",
    "Coral",
    "Dark orange",
    "Hot pink",
    "Khaki",
    "Dark khaki",
    "Violet",
    "Orange red",
];

/// An ordered set of named colors used for the final snapping step.
///
/// # Example
///
/// ```
/// use grid_quant::{Palette, Rgb};
///
/// let palette = Palette::standard();
/// assert_eq!(palette.len(), 32);
/// assert_eq!(palette.find_index(Rgb::BLACK), Some(1));
/// assert_eq!(palette.find_index(Rgb::new(1, 2, 3)), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    names: Vec<String>,
    colors: Vec<Rgb>,
}

impl Palette {
    /// Build a palette by resolving each name through [`lookup_color`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `names` is empty ([`PaletteError::EmptyPalette`])
    /// - there are more than [`MAX_PALETTE_COLORS`] names ([`PaletteError::TooManyColors`])
    /// - a name cannot be resolved ([`PaletteError::UnknownColor`])
    /// - two names resolve to the same RGB ([`PaletteError::DuplicateColor`])
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, PaletteError> {
        if names.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if names.len() > MAX_PALETTE_COLORS {
            return Err(PaletteError::TooManyColors {
                count: names.len(),
                max: MAX_PALETTE_COLORS,
            });
        }

        let mut colors = Vec::with_capacity(names.len());
        let mut seen = HashSet::new();
        for (index, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let color = lookup_color(name).ok_or_else(|| PaletteError::UnknownColor {
                index,
                name: name.to_string(),
            })?;
            if !seen.insert(color) {
                return Err(PaletteError::DuplicateColor { index });
            }
            colors.push(color);
        }

        let names = names.iter().map(|n| n.as_ref().trim().to_string()).collect();
        Ok(Self { names, colors })
    }

    /// The standard 32-color worksheet palette.
    pub fn standard() -> Self {
        let colors = STANDARD_COLOR_NAMES
            .iter()
            .filter_map(|name| lookup_color(name))
            .collect::<Vec<_>>();
        debug_assert_eq!(colors.len(), MAX_PALETTE_COLORS);
        Self {
            names: STANDARD_COLOR_NAMES.iter().map(|n| n.to_string()).collect(),
            colors,
        }
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette is empty.
    ///
    /// Always `false` for palettes built through [`Palette::from_names`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The RGB value at `idx`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// The configured name at `idx` (as given, trimmed).
    #[inline]
    pub fn name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    /// All colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Position of an exact RGB match, or `None`.
    ///
    /// No tolerance: snapped pixels coincide with a palette entry by
    /// construction, so a miss means the color never went through the
    /// snapping step (or is white in a palette without white).
    pub fn find_index(&self, color: Rgb) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    /// Position of the closest entry by squared RGB distance.
    ///
    /// Ties go to the lowest position, which keeps results deterministic.
    #[inline]
    pub fn find_nearest(&self, color: Rgb) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, &palette_color) in self.colors.iter().enumerate() {
            let dist = color.distance_squared(palette_color);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
                if dist == 0 {
                    break;
                }
            }
        }

        best_idx
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}
