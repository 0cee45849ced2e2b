//! Color histogram over an RGB image.

use std::collections::BTreeMap;

use image::RgbImage;

use crate::color::Rgb;

/// Distinct colors of an image with their pixel counts, sorted by color.
///
/// Sorting makes every consumer (box splitting, tie breaks) independent of
/// hash order, so quantizing the same image twice gives the same result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    entries: Vec<(Rgb, u32)>,
}

impl Histogram {
    /// Count every pixel of `img`.
    pub fn from_image(img: &RgbImage) -> Self {
        let mut counts: BTreeMap<Rgb, u32> = BTreeMap::new();
        for pixel in img.pixels() {
            *counts.entry(Rgb::from(*pixel)).or_insert(0) += 1;
        }
        Self {
            entries: counts.into_iter().collect(),
        }
    }

    /// Number of distinct colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for an image without pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(color, count)` pairs sorted by color.
    #[inline]
    pub fn entries(&self) -> &[(Rgb, u32)] {
        &self.entries
    }

    pub(crate) fn into_entries(self) -> Vec<(Rgb, u32)> {
        self.entries
    }
}
