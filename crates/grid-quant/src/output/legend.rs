//! Legend: sequential numbers for the colors a worksheet uses.

use crate::api::QuantizeError;
use crate::color::Rgb;
use crate::output::QuantizedImage;
use crate::palette::Palette;

/// One numbered color of a worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    /// Slot in the quantized image's color table.
    pub slot: u8,
    /// Number written into the cells, starting at 1.
    pub number: u32,
    /// Position of the color in the reference palette (selects its name).
    pub palette_index: usize,
    /// The color itself.
    pub color: Rgb,
    /// Six uppercase hex digits, RRGGBB.
    pub hex: String,
}

/// Mapping from image slots to worksheet numbers.
///
/// Numbers are contiguous from 1 and follow the image's color-table order.
/// White is skipped entirely: it gets no number and no entry.
///
/// # Example
///
/// ```
/// use grid_quant::{Legend, Palette, QuantizedImage};
/// use image::RgbImage;
///
/// let mut img = RgbImage::from_pixel(1, 2, image::Rgb([255, 255, 255]));
/// img.put_pixel(0, 0, image::Rgb([0, 0, 0]));
///
/// let palette = Palette::standard();
/// let quantized = QuantizedImage::from_rgb(&img).unwrap();
/// let legend = Legend::build(&quantized, &palette).unwrap();
///
/// assert_eq!(legend.len(), 1);
/// let black = legend.get(0).unwrap();
/// assert_eq!((black.number, black.palette_index, black.hex.as_str()), (1, 1, "000000"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Legend {
    entries: Vec<LegendEntry>,
    /// Entry position per slot, `None` for white.
    by_slot: Vec<Option<usize>>,
}

impl Legend {
    /// Number the non-white colors of `image`.
    ///
    /// # Errors
    ///
    /// [`QuantizeError::ColorNotInPalette`] if the image uses a color that
    /// is not a reference palette entry, i.e. it was never snapped.
    pub fn build(image: &QuantizedImage, palette: &Palette) -> Result<Self, QuantizeError> {
        let mut entries = Vec::new();
        let mut by_slot = vec![None; image.colors().len()];

        for (slot, &color) in image.colors().iter().enumerate() {
            if color.is_white() {
                continue;
            }
            let palette_index = palette
                .find_index(color)
                .ok_or(QuantizeError::ColorNotInPalette { color })?;

            by_slot[slot] = Some(entries.len());
            entries.push(LegendEntry {
                slot: slot as u8,
                number: entries.len() as u32 + 1,
                palette_index,
                color,
                hex: color.to_hex(),
            });
        }

        Ok(Self { entries, by_slot })
    }

    /// Entry for a slot, `None` for white (or an unknown slot).
    #[inline]
    pub fn get(&self, slot: u8) -> Option<&LegendEntry> {
        self.by_slot
            .get(slot as usize)
            .copied()
            .flatten()
            .map(|i| &self.entries[i])
    }

    /// Entries in number order.
    #[inline]
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Iterate entries in number order.
    pub fn iter(&self) -> impl Iterator<Item = &LegendEntry> {
        self.entries.iter()
    }

    /// Number of legend entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the worksheet is blank (white only).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
