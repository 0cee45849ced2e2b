use crate::error::ConfigError;
use grid_quant::{Palette, PaletteError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Env var naming a config file when `--config` is not given
pub const CONFIG_ENV: &str = "PIXEL_WORKSHEET_CONFIG";

/// Application configuration loaded from a YAML file
///
/// Every key is optional. Command-line flags override these values.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Reference palette as color names, in legend-name order
    #[serde(default)]
    pub palette: Option<Vec<String>>,

    /// Default grid width
    #[serde(default)]
    pub width: Option<i64>,

    /// Default number of colors, white included
    #[serde(default)]
    pub colors: Option<i64>,

    /// Default resampling filter name
    #[serde(default)]
    pub filter: Option<String>,

    /// Default language code
    #[serde(default)]
    pub language: Option<String>,

    /// Directory with extra or replacement language files
    #[serde(default)]
    pub lang_dir: Option<PathBuf>,

    /// Allow widths larger than the source image
    #[serde(default)]
    pub allow_upscale: bool,
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document is a valid, empty config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Load configuration from a file. Read and parse failures are errors.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Pick and load the configuration file
    ///
    /// An explicitly given file must load. A file named by the env var is
    /// best effort: problems are logged and defaults are used. With
    /// neither, defaults are used.
    pub fn resolve(explicit: Option<&Path>, from_env: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        match from_env {
            Some(path) => match Self::load_file(&path) {
                Ok(config) => Ok(config),
                Err(e) => {
                    tracing::warn!(%e, "Failed to load config, using defaults");
                    Ok(Self::default())
                }
            },
            None => Ok(Self::default()),
        }
    }

    /// Load configuration the way the binary does (`--config`, then env var)
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::resolve(explicit, from_env)
    }

    /// Build the reference palette: the configured names or the standard 32
    pub fn palette(&self) -> Result<Palette, PaletteError> {
        match &self.palette {
            Some(names) => Palette::from_names(names),
            None => Ok(Palette::standard()),
        }
    }
}
