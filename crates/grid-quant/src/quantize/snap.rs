//! Snap every pixel to its nearest reference palette color.
//!
//! No dithering: each output pixel is exactly one palette entry, so every
//! cell of the worksheet gets a single legend number.

use std::collections::HashMap;

use image::RgbImage;

use crate::color::Rgb;
use crate::palette::Palette;

/// Replace each pixel with the nearest color of `palette`.
///
/// Nearest means smallest squared RGB distance; ties go to the lower
/// palette position. Lookups are cached per distinct source color.
pub fn snap_to_palette(img: &RgbImage, palette: &Palette) -> RgbImage {
    let mut cache: HashMap<Rgb, Rgb> = HashMap::new();
    let mut output = img.clone();

    for pixel in output.pixels_mut() {
        let source = Rgb::from(*pixel);
        let snapped = *cache
            .entry(source)
            .or_insert_with(|| palette.color(palette.find_nearest(source)));
        *pixel = snapped.into();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_colors_unchanged() {
        let palette = Palette::standard();
        let img = RgbImage::from_fn(4, 8, |x, y| {
            image::Rgb(palette.color((y * 4 + x) as usize).to_bytes())
        });
        assert_eq!(snap_to_palette(&img, &palette), img);
    }

    #[test]
    fn test_every_pixel_lands_in_palette() {
        let palette = Palette::standard();
        let img = RgbImage::from_fn(16, 16, |x, y| {
            image::Rgb([(x * 17) as u8, (y * 17) as u8, ((x * y) % 256) as u8])
        });
        let snapped = snap_to_palette(&img, &palette);
        for pixel in snapped.pixels() {
            assert!(
                palette.find_index(Rgb::from(*pixel)).is_some(),
                "{:?} is not a palette color",
                pixel
            );
        }
    }

    #[test]
    fn test_near_colors_snap() {
        let palette = Palette::from_names(&["White", "Black", "Red"]).unwrap();
        let mut img = RgbImage::new(3, 1);
        img.put_pixel(0, 0, image::Rgb([240, 250, 245]));
        img.put_pixel(1, 0, image::Rgb([30, 20, 10]));
        img.put_pixel(2, 0, image::Rgb([200, 40, 40]));

        let snapped = snap_to_palette(&img, &palette);
        assert_eq!(snapped.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(snapped.get_pixel(1, 0).0, [0, 0, 0]);
        assert_eq!(snapped.get_pixel(2, 0).0, [255, 0, 0]);
    }
}
