use std::path::PathBuf;

use grid_quant::{PaletteError, QuantizeError};
use thiserror::Error;

/// Process exit code for a successful run.
pub const EXIT_OK: u8 = 0;
/// Process exit code when the image could not be read or processed.
pub const EXIT_READ: u8 = 1;
/// Process exit code when an output file could not be written.
pub const EXIT_WRITE: u8 = 2;
/// Process exit code for a broken configuration.
pub const EXIT_CONFIG: u8 = 3;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error reading image file {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Error processing image: {0}")]
    Quantize(#[from] QuantizeError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Exit code reported to the calling shell.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::ImageRead { .. } | AppError::Quantize(_) => EXIT_READ,
            AppError::Write(_) => EXIT_WRITE,
            AppError::Config(_) => EXIT_CONFIG,
        }
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Error writing workbook file {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Error laying out worksheet: {0}")]
    Layout(#[from] rust_xlsxwriter::XlsxError),

    #[error("Grid of {width}x{height} cells does not fit in a worksheet")]
    GridTooLarge { width: u32, height: u32 },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Preview of {width}x{height} cells at {scale} pixels per cell is too large")]
    PreviewTooLarge { width: u32, height: u32, scale: u32 },

    #[error("Error writing preview file {}: {source}", path.display())]
    Preview {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid palette: {0}")]
    Palette(#[from] PaletteError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let read = AppError::ImageRead {
            path: PathBuf::from("missing.png"),
            source: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "gone",
            )),
        };
        assert_eq!(read.exit_code(), EXIT_READ);

        let quantize = AppError::Quantize(QuantizeError::EmptyImage);
        assert_eq!(quantize.exit_code(), EXIT_READ);

        let write = AppError::Write(WriteError::PngEncode("boom".to_string()));
        assert_eq!(write.exit_code(), EXIT_WRITE);

        let config = AppError::Config(ConfigError::Palette(PaletteError::EmptyPalette));
        assert_eq!(config.exit_code(), EXIT_CONFIG);
    }

    #[test]
    fn test_exit_codes_distinct() {
        let codes = [EXIT_OK, EXIT_READ, EXIT_WRITE, EXIT_CONFIG];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_image_read_message() {
        let error = AppError::ImageRead {
            path: PathBuf::from("cat.jpg"),
            source: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No such file",
            )),
        };
        assert!(error.to_string().starts_with("Error reading image file cat.jpg:"));
    }

    #[test]
    fn test_config_palette_message() {
        let error = AppError::Config(ConfigError::Palette(PaletteError::UnknownColor {
            index: 2,
            name: "Mauve-ish".to_string(),
        }));
        assert_eq!(
            error.to_string(),
            "Configuration error: invalid palette: unknown color name 'Mauve-ish' at index 2"
        );
    }

    #[test]
    fn test_png_encode_message() {
        let error = WriteError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }
}
