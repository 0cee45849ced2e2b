//! One image in, one worksheet out
//!
//! Ties the pieces together: decode the image, run the quantizer, write the
//! workbook and (optionally) a preview.

use std::fs;
use std::path::{Path, PathBuf};

use grid_quant::{Adjustment, Palette, QuantizeOptions, Quantizer, MAX_PALETTE_COLORS};

use crate::assets::AssetLoader;
use crate::error::{AppError, ConfigError};
use crate::models::{AppConfig, Texts};
use crate::services::preview::{encode_preview, write_preview};
use crate::services::worksheet::WorksheetWriter;

/// Env var naming an external language directory
pub const LANG_DIR_ENV: &str = "LANG_DIR";

/// Default preview size of one cell, in pixels
pub const DEFAULT_PREVIEW_SCALE: u32 = 10;

/// Settings given on the command line; each one beats the config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub width: Option<i64>,
    pub colors: Option<i64>,
    pub filter: Option<String>,
    pub language: Option<String>,
    pub allow_upscale: bool,
}

/// Files for one conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertRequest {
    pub input: PathBuf,
    /// Workbook path, `<input>.xlsx` when absent
    pub output: Option<PathBuf>,
    pub preview: Option<PathBuf>,
    pub preview_scale: u32,
}

impl ConvertRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            preview: None,
            preview_scale: DEFAULT_PREVIEW_SCALE,
        }
    }

    /// Workbook path actually used
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// What a conversion produced
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub preview: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    /// Numbered (non-white) colors
    pub legend_colors: usize,
    pub adjustments: Vec<Adjustment>,
}

/// `<input>.xlsx`, keeping the original extension
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".xlsx");
    PathBuf::from(name)
}

/// Image-to-worksheet converter
///
/// Reusable: palette, options and texts are resolved once.
pub struct Converter {
    quantizer: Quantizer,
    texts: Texts,
}

impl Converter {
    pub fn new(quantizer: Quantizer, texts: Texts) -> Self {
        Self { quantizer, texts }
    }

    /// Build a converter from the config file and command-line overrides
    ///
    /// The language directory comes from the config file, else from
    /// `env_lang_dir`. Language files in the working directory are found
    /// too.
    pub fn from_config(
        config: &AppConfig,
        overrides: Overrides,
        env_lang_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let palette = config.palette()?;
        tracing::debug!(colors = palette.len(), "Reference palette ready");

        let mut options = QuantizeOptions::new()
            .colors(
                overrides
                    .colors
                    .or(config.colors)
                    .unwrap_or(MAX_PALETTE_COLORS as i64),
            )
            .allow_upscale(overrides.allow_upscale || config.allow_upscale);
        if let Some(width) = overrides.width.or(config.width) {
            options = options.width(width);
        }
        if let Some(filter) = overrides.filter.or_else(|| config.filter.clone()) {
            options = options.filter(filter);
        }

        let lang_dir = config.lang_dir.clone().or(env_lang_dir);
        let loader = AssetLoader::new(lang_dir).with_local_dir(std::env::current_dir().ok());
        let language = overrides.language.or_else(|| config.language.clone());
        let texts = Texts::load(&loader, language.as_deref());

        Ok(Self::new(Quantizer::new(palette).options(options), texts))
    }

    pub fn palette(&self) -> &Palette {
        self.quantizer.palette()
    }

    pub fn texts(&self) -> &Texts {
        &self.texts
    }

    /// Convert one image
    ///
    /// Either every requested file is written or none is left behind: the
    /// preview is encoded before the workbook is saved, and the workbook is
    /// removed again when the preview file cannot be written.
    pub fn convert(&self, request: &ConvertRequest) -> Result<ConvertReport, AppError> {
        let img = image::open(&request.input).map_err(|source| AppError::ImageRead {
            path: request.input.clone(),
            source,
        })?;
        tracing::info!(
            path = %request.input.display(),
            width = img.width(),
            height = img.height(),
            "Read image"
        );

        let result = self.quantizer.quantize(&img)?;

        let preview = match request.preview {
            Some(ref path) => Some((path, encode_preview(&result.image, request.preview_scale)?)),
            None => None,
        };

        let output = request.output_path();
        WorksheetWriter::new(self.quantizer.palette(), &self.texts).write(&output, &result)?;

        if let Some((path, bytes)) = preview {
            if let Err(e) = write_preview(path, &bytes) {
                if let Err(remove) = fs::remove_file(&output) {
                    tracing::warn!(
                        path = %output.display(),
                        "Could not remove workbook after failed preview: {remove}"
                    );
                }
                return Err(e.into());
            }
        }

        Ok(ConvertReport {
            output,
            preview: request.preview.clone(),
            width: result.image.width(),
            height: result.image.height(),
            legend_colors: result.legend.len(),
            adjustments: result.adjustments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("funny_image.jpg")),
            PathBuf::from("funny_image.jpg.xlsx")
        );
        assert_eq!(
            default_output_path(Path::new("/tmp/a.b/cat")),
            PathBuf::from("/tmp/a.b/cat.xlsx")
        );
    }

    #[test]
    fn test_request_output_path() {
        let mut request = ConvertRequest::new("in.png");
        assert_eq!(request.output_path(), PathBuf::from("in.png.xlsx"));
        request.output = Some(PathBuf::from("out.xlsx"));
        assert_eq!(request.output_path(), PathBuf::from("out.xlsx"));
    }

    #[test]
    fn test_overrides_beat_config() {
        let config = AppConfig {
            language: Some("de".to_string()),
            colors: Some(4),
            ..AppConfig::default()
        };
        let overrides = Overrides {
            language: Some("es".to_string()),
            ..Overrides::default()
        };
        let converter = Converter::from_config(&config, overrides, None).unwrap();
        assert_eq!(converter.texts().code, "es");

        let converter = Converter::from_config(&config, Overrides::default(), None).unwrap();
        assert_eq!(converter.texts().code, "de");
    }

    #[test]
    fn test_bad_palette_is_config_error() {
        let config = AppConfig {
            palette: Some(vec!["White".to_string(), "White".to_string()]),
            ..AppConfig::default()
        };
        assert!(matches!(
            Converter::from_config(&config, Overrides::default(), None),
            Err(ConfigError::Palette(_))
        ));
    }

    #[test]
    fn test_custom_palette_used() {
        let config = AppConfig {
            palette: Some(vec!["White".to_string(), "Black".to_string(), "Red".to_string()]),
            ..AppConfig::default()
        };
        let converter = Converter::from_config(&config, Overrides::default(), None).unwrap();
        assert_eq!(converter.palette().len(), 3);
    }
}
