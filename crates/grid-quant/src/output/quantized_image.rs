//! QuantizedImage: per-pixel slots into an image-local color table.
//!
//! [`QuantizedImage`] is the canonical output of the pipeline. Each pixel
//! holds a small slot number; the slot's color lives in the image's own
//! table, which after snapping is a subset of the reference palette.

use std::collections::HashMap;

use image::RgbImage;

use crate::api::QuantizeError;
use crate::color::Rgb;

/// A palette-indexed image.
///
/// Slots are assigned in first-seen order of a row-major scan
/// (left to right, top to bottom). That order is also the legend order.
///
/// # Example
///
/// ```
/// use grid_quant::{QuantizedImage, Rgb};
/// use image::RgbImage;
///
/// let mut img = RgbImage::from_pixel(2, 2, image::Rgb([255, 255, 255]));
/// img.put_pixel(1, 0, image::Rgb([0, 0, 0]));
///
/// let quantized = QuantizedImage::from_rgb(&img).unwrap();
/// assert_eq!(quantized.slots(), &[0, 1, 0, 0]);
/// assert_eq!(quantized.colors(), &[Rgb::WHITE, Rgb::BLACK]);
/// assert_eq!(quantized.white_slot(), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedImage {
    /// Color-table slots, one per pixel, row-major order.
    slots: Vec<u8>,
    /// Image width in pixels.
    width: u32,
    /// Image height in pixels.
    height: u32,
    /// Image-local color table, indexed by slot.
    colors: Vec<Rgb>,
}

impl QuantizedImage {
    /// Create a `QuantizedImage` from slots and a color table.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `slots.len() == width * height` and that every
    /// slot indexes into `colors`.
    pub fn new(slots: Vec<u8>, width: u32, height: u32, colors: Vec<Rgb>) -> Self {
        debug_assert_eq!(
            slots.len(),
            width as usize * height as usize,
            "slots length ({}) must match width * height ({}x{})",
            slots.len(),
            width,
            height,
        );
        debug_assert!(slots.iter().all(|&s| (s as usize) < colors.len()));
        Self {
            slots,
            width,
            height,
            colors,
        }
    }

    /// Index an RGB image whose colors already come from a small palette.
    ///
    /// # Errors
    ///
    /// [`QuantizeError::TooManyColors`] if the image has more than 256
    /// distinct colors. Snapped images have at most 32.
    pub fn from_rgb(img: &RgbImage) -> Result<Self, QuantizeError> {
        let (width, height) = img.dimensions();
        let mut colors: Vec<Rgb> = Vec::new();
        let mut lookup: HashMap<Rgb, u8> = HashMap::new();
        let mut slots = Vec::with_capacity(width as usize * height as usize);

        for pixel in img.pixels() {
            let color = Rgb::from(*pixel);
            let slot = match lookup.get(&color) {
                Some(&slot) => slot,
                None => {
                    let slot = u8::try_from(colors.len())
                        .map_err(|_| QuantizeError::TooManyColors { limit: 256 })?;
                    colors.push(color);
                    lookup.insert(color, slot);
                    slot
                }
            };
            slots.push(slot);
        }

        Ok(Self::new(slots, width, height, colors))
    }

    /// Returns the slots as a slice, row-major.
    #[inline]
    pub fn slots(&self) -> &[u8] {
        &self.slots
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The image-local color table, indexed by slot.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color of a slot.
    #[inline]
    pub fn color(&self, slot: u8) -> Rgb {
        self.colors[slot as usize]
    }

    /// Slot of the pixel at column `x`, row `y`.
    #[inline]
    pub fn slot_at(&self, x: u32, y: u32) -> u8 {
        self.slots[y as usize * self.width as usize + x as usize]
    }

    /// Slot holding pure white, if the image uses white at all.
    ///
    /// White cells get neither a number nor a fill on the worksheet.
    pub fn white_slot(&self) -> Option<u8> {
        self.colors
            .iter()
            .position(|c| c.is_white())
            .map(|slot| slot as u8)
    }

    /// Expand back to an RGB image.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            self.color(self.slot_at(x, y)).into()
        })
    }
}
