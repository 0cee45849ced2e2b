//! Proportional downscaling with named resampling filters.

use std::fmt;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Resampling filter used when scaling the source image to the grid width.
///
/// Names are the usual imaging-tool set and parse case-insensitively.
/// The default is [`ResampleFilter::Bicubic`].
///
/// # Example
///
/// ```
/// use grid_quant::ResampleFilter;
///
/// let filter: ResampleFilter = "lanczos".parse().unwrap();
/// assert_eq!(filter, ResampleFilter::Lanczos);
/// assert!("FOO".parse::<ResampleFilter>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    /// Pick the nearest source pixel. Keeps hard pixel-art edges.
    Nearest,
    /// Area average over the source pixels covered by each target pixel.
    Box,
    /// Linear interpolation (triangle kernel).
    Bilinear,
    /// Hamming-windowed kernel. Approximated with `image`'s Gaussian
    /// kernel, which is somewhat softer than a true Hamming window.
    Hamming,
    /// Cubic (Catmull-Rom) interpolation.
    #[default]
    Bicubic,
    /// Lanczos with a 3-lobe window.
    Lanczos,
}

impl ResampleFilter {
    /// All filters in name-table order.
    pub const ALL: [ResampleFilter; 6] = [
        ResampleFilter::Nearest,
        ResampleFilter::Box,
        ResampleFilter::Bilinear,
        ResampleFilter::Hamming,
        ResampleFilter::Bicubic,
        ResampleFilter::Lanczos,
    ];

    /// Canonical upper-case name.
    pub fn name(self) -> &'static str {
        match self {
            ResampleFilter::Nearest => "NEAREST",
            ResampleFilter::Box => "BOX",
            ResampleFilter::Bilinear => "BILINEAR",
            ResampleFilter::Hamming => "HAMMING",
            ResampleFilter::Bicubic => "BICUBIC",
            ResampleFilter::Lanczos => "LANCZOS",
        }
    }

    /// Kernel passed to `image::imageops::resize`. `Box` has no kernel; it
    /// goes through area sampling instead.
    fn kernel(self) -> Option<FilterType> {
        match self {
            ResampleFilter::Nearest => Some(FilterType::Nearest),
            ResampleFilter::Box => None,
            ResampleFilter::Bilinear => Some(FilterType::Triangle),
            ResampleFilter::Hamming => Some(FilterType::Gaussian),
            ResampleFilter::Bicubic => Some(FilterType::CatmullRom),
            ResampleFilter::Lanczos => Some(FilterType::Lanczos3),
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for a filter name outside the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resample filter '{0}'")]
pub struct UnknownFilterError(pub String);

impl FromStr for ResampleFilter {
    type Err = UnknownFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|filter| filter.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownFilterError(s.to_string()))
    }
}

/// Height that keeps the aspect ratio at the new width, rounded to the
/// nearest integer (halves round up) and never below 1.
///
/// # Example
///
/// ```
/// use grid_quant::proportional_height;
///
/// // 20 * 17 / 30 = 11.33
/// assert_eq!(proportional_height(30, 17, 20), 11);
/// ```
pub fn proportional_height(width: u32, height: u32, new_width: u32) -> u32 {
    u32::try_from(proportional_height_wide(width, height, new_width)).unwrap_or(u32::MAX)
}

/// [`proportional_height`] without the `u32` cap, for limit checks.
pub(crate) fn proportional_height_wide(width: u32, height: u32, new_width: u32) -> u64 {
    if width == 0 {
        return height.max(1) as u64;
    }
    let num = 2 * new_width as u128 * height as u128 + width as u128;
    let den = 2 * width as u128;
    u64::try_from(num / den).unwrap_or(u64::MAX).max(1)
}

/// Scale `img` to `new_width` columns, keeping the aspect ratio.
pub fn resize_to_width(img: &RgbImage, new_width: u32, filter: ResampleFilter) -> RgbImage {
    let (width, height) = img.dimensions();
    let new_height = proportional_height(width, height, new_width);

    if (width, height) == (new_width, new_height) {
        return img.clone();
    }

    match filter.kernel() {
        Some(kernel) => imageops::resize(img, new_width, new_height, kernel),
        None => imageops::thumbnail(img, new_width, new_height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, image::Rgb(color))
    }

    #[test]
    fn test_filter_names_case_insensitive() {
        for filter in ResampleFilter::ALL {
            assert_eq!(filter.name().parse::<ResampleFilter>(), Ok(filter));
            assert_eq!(
                filter.name().to_lowercase().parse::<ResampleFilter>(),
                Ok(filter)
            );
        }
        assert_eq!(
            "BiCuBiC".parse::<ResampleFilter>(),
            Ok(ResampleFilter::Bicubic)
        );
    }

    #[test]
    fn test_unknown_filter() {
        assert_eq!(
            "FOO".parse::<ResampleFilter>(),
            Err(UnknownFilterError("FOO".to_string()))
        );
        assert!("".parse::<ResampleFilter>().is_err());
    }

    #[test]
    fn test_default_filter_is_bicubic() {
        assert_eq!(ResampleFilter::default(), ResampleFilter::Bicubic);
    }

    #[test]
    fn test_proportional_height_rounds() {
        assert_eq!(proportional_height(30, 17, 20), 11);
        // 10 * 15 / 20 = 7.5 rounds up
        assert_eq!(proportional_height(20, 15, 10), 8);
        // 10 * 13 / 20 = 6.5 rounds up
        assert_eq!(proportional_height(20, 13, 10), 7);
        assert_eq!(proportional_height(100, 50, 40), 20);
    }

    #[test]
    fn test_proportional_height_never_zero() {
        assert_eq!(proportional_height(1000, 1, 3), 1);
    }

    #[test]
    fn test_resize_dimensions_for_every_filter() {
        let input = solid_image(30, 17, [128, 64, 32]);
        for filter in ResampleFilter::ALL {
            let output = resize_to_width(&input, 20, filter);
            assert_eq!(output.dimensions(), (20, 11), "filter {filter}");
        }
    }

    #[test]
    fn test_resize_keeps_solid_color() {
        let input = solid_image(40, 20, [0, 0, 255]);
        for filter in [ResampleFilter::Nearest, ResampleFilter::Box] {
            let output = resize_to_width(&input, 10, filter);
            assert!(
                output.pixels().all(|p| p.0 == [0, 0, 255]),
                "filter {filter} changed a solid color"
            );
        }
    }

    #[test]
    fn test_resize_noop_same_dimensions() {
        let input = solid_image(8, 8, [1, 2, 3]);
        let output = resize_to_width(&input, 8, ResampleFilter::Lanczos);
        assert_eq!(output, input);
    }
}
