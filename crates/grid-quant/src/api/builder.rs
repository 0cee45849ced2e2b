//! Quantizer builder, the primary entry point of the crate.
//!
//! [`Quantizer`] wraps the whole pipeline behind fluent configuration:
//! normalize, resize, reduce, snap, index, number.

use image::{DynamicImage, RgbImage};

use super::QuantizeError;
use crate::output::{Legend, QuantizedImage};
use crate::palette::Palette;
use crate::preprocess::{resize_to_width, Adjustment, QuantizeOptions, ResampleFilter};
use crate::quantize::{reduce_colors, snap_to_palette};

/// High-level quantization builder.
///
/// # Design
///
/// - Constructor requires a [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`quantize()`](Self::quantize) takes `&self`, so one quantizer can
///   process any number of images
/// - Bad option values never fail: they resolve to defaults and come back
///   as [`Adjustment`]s on the result
///
/// # Example
///
/// ```
/// use grid_quant::{Palette, Quantizer};
/// use image::RgbImage;
///
/// let img = RgbImage::from_pixel(30, 17, image::Rgb([250, 10, 10]));
/// let result = Quantizer::new(Palette::standard())
///     .width(20)
///     .colors(5)
///     .quantize_rgb(img)
///     .unwrap();
///
/// assert_eq!((result.image.width(), result.image.height()), (20, 11));
/// assert_eq!(result.legend.len(), 1);
/// assert!(result.adjustments.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    palette: Palette,
    options: QuantizeOptions,
}

/// Everything one conversion produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantization {
    /// The indexed, palette-snapped image.
    pub image: QuantizedImage,
    /// Worksheet numbers for the image's colors.
    pub legend: Legend,
    /// Option values that were replaced by defaults, in pipeline order.
    pub adjustments: Vec<Adjustment>,
    /// Filter actually used for resizing.
    pub filter: ResampleFilter,
    /// Color budget actually used, `None` for the full palette.
    pub colors: Option<usize>,
}

impl Quantizer {
    /// Create a quantizer with default options.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            options: QuantizeOptions::default(),
        }
    }

    /// Replace all options at once.
    #[inline]
    pub fn options(mut self, options: QuantizeOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the target width in cells.
    #[inline]
    pub fn width(mut self, width: i64) -> Self {
        self.options = self.options.width(width);
        self
    }

    /// Set the resampling filter by name.
    #[inline]
    pub fn filter(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.filter(name);
        self
    }

    /// Set the color count, white included.
    #[inline]
    pub fn colors(mut self, colors: i64) -> Self {
        self.options = self.options.colors(colors);
        self
    }

    /// Allow a width larger than the source.
    #[inline]
    pub fn allow_upscale(mut self, enabled: bool) -> Self {
        self.options = self.options.allow_upscale(enabled);
        self
    }

    /// The reference palette.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Quantize a decoded image of any pixel format.
    ///
    /// Alpha is dropped and greyscale is expanded before anything else.
    pub fn quantize(&self, img: &DynamicImage) -> Result<Quantization, QuantizeError> {
        self.quantize_rgb(img.to_rgb8())
    }

    /// Quantize an RGB image.
    ///
    /// Applies the full pipeline:
    /// 1. Resize to the target width, height in proportion
    /// 2. Reduce to the color budget (skipped for the full palette)
    /// 3. Snap every pixel to the nearest palette color
    /// 4. Index the result and number its colors
    ///
    /// # Errors
    ///
    /// [`QuantizeError::EmptyImage`] for a zero-sized image.
    pub fn quantize_rgb(&self, img: RgbImage) -> Result<Quantization, QuantizeError> {
        let (source_width, source_height) = img.dimensions();
        if source_width == 0 || source_height == 0 {
            return Err(QuantizeError::EmptyImage);
        }

        let mut adjustments = Vec::new();
        let (filter, filter_adjustment) = self.options.resolve_filter();
        let (width, width_adjustment) = self.options.resolve_width(source_width, source_height);
        let (colors, colors_adjustment) = self.options.resolve_colors();
        adjustments.extend(width_adjustment);
        adjustments.extend(filter_adjustment);
        adjustments.extend(colors_adjustment);
        for adjustment in &adjustments {
            tracing::warn!("{}", adjustment);
        }

        // 1. Resize
        let img = match width {
            Some(width) => {
                let resized = resize_to_width(&img, width, filter);
                tracing::debug!(
                    from = %format_args!("{}x{}", source_width, source_height),
                    to = %format_args!("{}x{}", resized.width(), resized.height()),
                    %filter,
                    "resized"
                );
                resized
            }
            None => img,
        };

        // 2. Reduce
        let img = match colors {
            Some(colors) => reduce_colors(&img, colors),
            None => img,
        };

        // 3. Snap
        let img = snap_to_palette(&img, &self.palette);

        // 4. Index and number
        let image = QuantizedImage::from_rgb(&img)?;
        let legend = Legend::build(&image, &self.palette)?;
        tracing::debug!(
            colors = image.colors().len(),
            numbered = legend.len(),
            "quantized"
        );

        Ok(Quantization {
            image,
            legend,
            adjustments,
            filter,
            colors,
        })
    }
}
