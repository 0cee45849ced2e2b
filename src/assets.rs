//! Asset loading with embedded fallbacks
//!
//! Language files ship inside the binary. Files on disk take priority when
//! they exist for the requested code, searched in this order:
//!
//! 1. The external language directory (config file or LANG_DIR env var)
//! 2. The local directory, usually the working directory
//! 3. The embedded files

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Embedded language files (`<code>.txt`)
#[derive(RustEmbed)]
#[folder = "lang/"]
#[include = "*.txt"]
struct EmbeddedLang;

/// Language file loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External language directory
    lang_dir: Option<PathBuf>,
    /// Searched after `lang_dir`, never listed
    local_dir: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// `lang_dir` should be `Some` only if a directory was configured.
    /// If `None`, embedded files are used exclusively.
    pub fn new(lang_dir: Option<PathBuf>) -> Self {
        Self {
            lang_dir,
            local_dir: None,
        }
    }

    /// Also look for `<code>.txt` in `dir` before the embedded files
    pub fn with_local_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.local_dir = dir;
        self
    }

    /// File name for a language code. Codes are matched lower-case.
    fn file_name(code: &str) -> String {
        format!("{}.txt", code.trim().to_lowercase())
    }

    /// Read the language file for `code`
    ///
    /// Tries the configured directories first, then falls back to embedded.
    pub fn read_lang(&self, code: &str) -> io::Result<Cow<'static, [u8]>> {
        let name = Self::file_name(code);

        for dir in self.lang_dir.iter().chain(self.local_dir.iter()) {
            let full_path = dir.join(&name);
            if full_path.exists() {
                tracing::trace!(path = %full_path.display(), "Loading language from filesystem");
                return Ok(Cow::Owned(fs::read(&full_path)?));
            }
        }

        EmbeddedLang::get(&name)
            .map(|f| {
                tracing::trace!(file = %name, "Loading language from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Language file not found: {name}"),
                )
            })
    }

    /// Read the language file for `code` as a UTF-8 string
    pub fn read_lang_string(&self, code: &str) -> io::Result<String> {
        let bytes = self.read_lang(code)?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// List all available language codes (merged view of embedded + external)
    pub fn list_languages(&self) -> Vec<String> {
        let mut codes: BTreeSet<String> = EmbeddedLang::iter()
            .filter_map(|f| f.strip_suffix(".txt").map(str::to_string))
            .collect();

        if let Some(ref dir) = self.lang_dir {
            if let Ok(entries) = fs::read_dir(dir) {
                for entry in entries.flatten() {
                    if let Some(name) = entry.file_name().to_str() {
                        if let Some(code) = name.strip_suffix(".txt") {
                            codes.insert(code.to_lowercase());
                        }
                    }
                }
            }
        }

        codes.into_iter().collect()
    }
}
