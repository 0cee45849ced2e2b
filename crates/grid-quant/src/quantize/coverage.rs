//! Coverage-first median cut.
//!
//! Classic median cut over the color histogram, with one twist: the box
//! split next is always the one covering the most pixels. Large flat
//! regions therefore keep their own color while small details get merged,
//! which is what a color-by-number sheet needs.

use std::collections::HashMap;

use image::RgbImage;

use super::histogram::Histogram;
use crate::color::Rgb;

/// A box in RGB space holding the histogram entries `start..end`.
#[derive(Debug, Clone)]
struct ColorBox {
    start: usize,
    end: usize,
    pixels: u64,
    min: [u8; 3],
    max: [u8; 3],
}

impl ColorBox {
    fn new(entries: &[(Rgb, u32)], start: usize, end: usize) -> Self {
        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        let mut pixels = 0u64;

        for &(color, count) in &entries[start..end] {
            let bytes = color.to_bytes();
            for c in 0..3 {
                min[c] = min[c].min(bytes[c]);
                max[c] = max[c].max(bytes[c]);
            }
            pixels += count as u64;
        }

        Self {
            start,
            end,
            pixels,
            min,
            max,
        }
    }

    #[inline]
    fn colors(&self) -> usize {
        self.end - self.start
    }

    /// Channel with the widest value range. Ties prefer red, then green.
    fn widest_channel(&self) -> usize {
        let range = |c: usize| self.max[c] - self.min[c];
        if range(0) >= range(1) && range(0) >= range(2) {
            0
        } else if range(1) >= range(2) {
            1
        } else {
            2
        }
    }

    /// Split at the pixel-weighted median of the widest channel.
    ///
    /// Both halves keep at least one color. Requires `colors() >= 2`.
    fn split(&self, entries: &mut [(Rgb, u32)]) -> (ColorBox, ColorBox) {
        let channel = self.widest_channel();
        entries[self.start..self.end]
            .sort_unstable_by_key(|&(color, _)| (color.to_bytes()[channel], color));

        let half = self.pixels.div_ceil(2);
        let mut cumulative = 0u64;
        let mut cut = self.end - 1;
        for i in self.start..self.end - 1 {
            cumulative += entries[i].1 as u64;
            if cumulative >= half {
                cut = i + 1;
                break;
            }
        }

        (
            ColorBox::new(entries, self.start, cut),
            ColorBox::new(entries, cut, self.end),
        )
    }

    /// Pixel-weighted mean color, rounded to the nearest byte.
    fn mean(&self, entries: &[(Rgb, u32)]) -> Rgb {
        let mut sums = [0u64; 3];
        for &(color, count) in &entries[self.start..self.end] {
            for (sum, value) in sums.iter_mut().zip(color.to_bytes()) {
                *sum += value as u64 * count as u64;
            }
        }
        let total = self.pixels.max(1);
        let avg = |sum: u64| ((sum + total / 2) / total) as u8;
        Rgb::new(avg(sums[0]), avg(sums[1]), avg(sums[2]))
    }
}

/// Choose at most `max_colors` representative colors for `histogram`.
///
/// Returns a map from every histogram color to its representative.
/// Images that already have few enough colors map every color to itself.
pub fn coverage_palette(histogram: Histogram, max_colors: usize) -> HashMap<Rgb, Rgb> {
    let max_colors = max_colors.max(1);
    if histogram.len() <= max_colors {
        return histogram
            .entries()
            .iter()
            .map(|&(color, _)| (color, color))
            .collect();
    }

    let mut entries = histogram.into_entries();
    let mut boxes = vec![ColorBox::new(&entries, 0, entries.len())];

    while boxes.len() < max_colors {
        // Largest pixel coverage first; first box wins ties.
        let mut target: Option<usize> = None;
        for (i, b) in boxes.iter().enumerate() {
            if b.colors() < 2 {
                continue;
            }
            if target.map_or(true, |t| b.pixels > boxes[t].pixels) {
                target = Some(i);
            }
        }
        let Some(target) = target else {
            break;
        };

        let (low, high) = boxes[target].split(&mut entries);
        boxes[target] = low;
        boxes.push(high);
    }

    let mut mapping = HashMap::with_capacity(entries.len());
    for b in &boxes {
        let representative = b.mean(&entries);
        for &(color, _) in &entries[b.start..b.end] {
            mapping.insert(color, representative);
        }
    }
    mapping
}

/// Reduce `img` to at most `max_colors` distinct colors.
///
/// # Example
///
/// ```
/// use grid_quant::reduce_colors;
/// use image::{Rgb, RgbImage};
///
/// let img = RgbImage::from_fn(8, 8, |x, y| Rgb([(x * 30) as u8, (y * 30) as u8, 0]));
/// let reduced = reduce_colors(&img, 4);
///
/// let mut distinct: Vec<_> = reduced.pixels().map(|p| p.0).collect();
/// distinct.sort();
/// distinct.dedup();
/// assert!(distinct.len() <= 4);
/// ```
pub fn reduce_colors(img: &RgbImage, max_colors: usize) -> RgbImage {
    let histogram = Histogram::from_image(img);
    if histogram.len() <= max_colors {
        return img.clone();
    }

    let mapping = coverage_palette(histogram, max_colors);
    let mut output = img.clone();
    for pixel in output.pixels_mut() {
        if let Some(&color) = mapping.get(&Rgb::from(*pixel)) {
            *pixel = color.into();
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn distinct(img: &RgbImage) -> HashSet<[u8; 3]> {
        img.pixels().map(|p| p.0).collect()
    }

    /// 10x10 image: 70 pixels of a large red region, 20 blue, and ten
    /// single-pixel specks of slightly different greens.
    fn regions_image() -> RgbImage {
        RgbImage::from_fn(10, 10, |x, y| {
            let i = y * 10 + x;
            if i < 70 {
                image::Rgb([200, 30, 30])
            } else if i < 90 {
                image::Rgb([20, 40, 220])
            } else {
                image::Rgb([10, 150 + (i - 90) as u8 * 3, 10])
            }
        })
    }

    #[test]
    fn test_few_colors_untouched() {
        let img = regions_image();
        let reduced = reduce_colors(&img, 12);
        assert_eq!(reduced, img);
    }

    #[test]
    fn test_color_budget_respected() {
        let img = RgbImage::from_fn(16, 16, |x, y| image::Rgb([(x * 16) as u8, (y * 16) as u8, 77]));
        for budget in [2, 3, 5, 8, 31] {
            let reduced = reduce_colors(&img, budget);
            assert!(
                distinct(&reduced).len() <= budget,
                "budget {budget} gave {} colors",
                distinct(&reduced).len()
            );
            assert_eq!(reduced.dimensions(), img.dimensions());
        }
    }

    #[test]
    fn test_large_regions_keep_exact_color() {
        let img = regions_image();
        let reduced = reduce_colors(&img, 3);

        assert_eq!(reduced.get_pixel(0, 0).0, [200, 30, 30]);
        assert_eq!(reduced.get_pixel(0, 8).0, [20, 40, 220]);
        // The green specks collapse into a single mean green
        let greens: HashSet<[u8; 3]> = (0..10).map(|x| reduced.get_pixel(x, 9).0).collect();
        assert_eq!(greens.len(), 1);
    }

    #[test]
    fn test_two_colors_separates_dominant_regions() {
        let mut img = RgbImage::from_pixel(4, 4, image::Rgb([250, 250, 250]));
        for x in 0..4 {
            img.put_pixel(x, 3, image::Rgb([5, 5, 5]));
            img.put_pixel(x, 2, image::Rgb([15, 5, 5]));
        }
        let reduced = reduce_colors(&img, 2);
        let colors = distinct(&reduced);
        assert_eq!(colors.len(), 2);
        assert!(colors.contains(&[250, 250, 250]));
        assert!(colors.contains(&[10, 5, 5]));
    }

    #[test]
    fn test_deterministic() {
        let img = RgbImage::from_fn(12, 9, |x, y| image::Rgb([(x * 21) as u8, (y * 28) as u8, ((x + y) * 9) as u8]));
        let first = reduce_colors(&img, 6);
        let second = reduce_colors(&img, 6);
        assert_eq!(first, second);
    }

    #[test]
    fn test_mapping_covers_every_color() {
        let img = regions_image();
        let histogram = Histogram::from_image(&img);
        let colors: Vec<Rgb> = histogram.entries().iter().map(|&(c, _)| c).collect();
        let mapping = coverage_palette(histogram, 4);
        for color in colors {
            assert!(mapping.contains_key(&color), "{color} not mapped");
        }
    }
}
