//! Indexed PNG preview of a quantized image
//!
//! Lets the worksheet author check the result before printing. Pixels are
//! written as slots into a PLTE chunk holding the image's own color table,
//! at the smallest bit depth that fits.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use grid_quant::QuantizedImage;

use crate::error::WriteError;

/// Largest preview, in pixels
pub const MAX_PREVIEW_PIXELS: u64 = 100_000_000;

/// Encode `image` as an indexed PNG, `scale` pixels per cell
pub fn encode_preview(image: &QuantizedImage, scale: u32) -> Result<Vec<u8>, WriteError> {
    let scale = scale.max(1);
    let (width, height) = preview_size(image, scale)?;

    let slots = if scale == 1 {
        image.slots().to_vec()
    } else {
        upscale_slots(image, scale)
    };

    let (depth, bits) = match image.colors().len() {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    };
    let plte: Vec<u8> = image.colors().iter().flat_map(|c| c.to_bytes()).collect();
    let packed = if bits == 8 {
        slots
    } else {
        pack_nbits(&slots, width, bits)
    };

    encode_png(width, height, depth, &plte, &packed)
}

/// Preview dimensions, refused when they pass [`MAX_PREVIEW_PIXELS`]
fn preview_size(image: &QuantizedImage, scale: u32) -> Result<(u32, u32), WriteError> {
    let too_large = || WriteError::PreviewTooLarge {
        width: image.width(),
        height: image.height(),
        scale,
    };
    let width = image.width().checked_mul(scale).ok_or_else(too_large)?;
    let height = image.height().checked_mul(scale).ok_or_else(too_large)?;
    if width as u64 * height as u64 > MAX_PREVIEW_PIXELS {
        return Err(too_large());
    }
    Ok((width, height))
}

/// Write encoded preview bytes to `path`
pub fn write_preview(path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    fs::write(path, bytes).map_err(|source| WriteError::Preview {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote preview");
    Ok(())
}

/// Repeat every slot `scale` times in both directions
fn upscale_slots(image: &QuantizedImage, scale: u32) -> Vec<u8> {
    let width = image.width() * scale;
    let height = image.height() * scale;
    let mut out = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            out.push(image.slot_at(x / scale, y / scale));
        }
    }
    out
}

fn encode_png(
    width: u32,
    height: u32,
    bit_depth: png::BitDepth,
    plte: &[u8],
    packed: &[u8],
) -> Result<Vec<u8>, WriteError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Best);
        encoder.set_palette(plte);
        let mut writer = encoder
            .write_header()
            .map_err(|e| WriteError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(packed)
            .map_err(|e| WriteError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack slot values into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(slots: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = slots.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in slots.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &slot) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (slot & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use pretty_assertions::assert_eq;

    fn quantized(width: u32, height: u32, colors: &[[u8; 3]]) -> QuantizedImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb(colors[((x + y * width) as usize) % colors.len()])
        });
        QuantizedImage::from_rgb(&img).unwrap()
    }

    #[test]
    fn test_pack_nbits() {
        assert_eq!(pack_nbits(&[1, 0, 1, 1, 0, 0, 0, 1, 1], 9, 1), vec![0b1011_0001, 0b1000_0000]);
        assert_eq!(pack_nbits(&[3, 2, 1], 3, 2), vec![0b1110_0100]);
        assert_eq!(pack_nbits(&[0xA, 0x5, 0xF, 0x1], 2, 4), vec![0xA5, 0xF1]);
    }

    #[test]
    fn test_preview_decodes_to_same_colors() {
        let colors = [[255, 255, 255], [0, 0, 0], [255, 0, 0], [0, 0, 255], [255, 215, 0]];
        let image = quantized(7, 3, &colors);
        let bytes = encode_preview(&image, 1).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded, image.to_rgb_image());
    }

    #[test]
    fn test_preview_scale() {
        let image = quantized(3, 2, &[[0, 0, 0], [255, 255, 255]]);
        let bytes = encode_preview(&image, 4).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (12, 8));
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(decoded.get_pixel(4, 0).0, [255, 255, 255]);
        assert_eq!(decoded.get_pixel(3, 7).0, [255, 255, 255]);
    }

    #[test]
    fn test_write_preview_bad_path() {
        let image = quantized(1, 1, &[[0, 0, 0]]);
        let dir = tempfile::TempDir::new().unwrap();
        let bytes = encode_preview(&image, 1).unwrap();
        let err = write_preview(&dir.path().join("missing/p.png"), &bytes).unwrap_err();
        assert!(matches!(err, WriteError::Preview { .. }));
    }

    #[test]
    fn test_preview_scale_overflow_rejected() {
        let image = quantized(3, 2, &[[0, 0, 0]]);
        for scale in [u32::MAX, 2_000_000_000, 10_000] {
            let err = encode_preview(&image, scale).unwrap_err();
            assert!(
                matches!(err, WriteError::PreviewTooLarge { width: 3, height: 2, .. }),
                "scale {scale}"
            );
        }
    }

    #[test]
    fn test_preview_size_limit_is_inclusive() {
        let image = quantized(1, 1, &[[0, 0, 0]]);
        assert_eq!(preview_size(&image, 10_000).unwrap(), (10_000, 10_000));
        assert!(preview_size(&image, 10_001).is_err());
    }
}
