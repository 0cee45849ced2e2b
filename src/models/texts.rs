use crate::assets::AssetLoader;
use grid_quant::{Palette, MAX_PALETTE_COLORS, STANDARD_COLOR_NAMES};
use thiserror::Error;

/// Number of caption lines at the top of a language file
pub const CAPTION_LINES: usize = 3;

/// Built-in English captions: instructions, numbers sheet, colors sheet
pub const ENGLISH_CAPTIONS: [&str; CAPTION_LINES] = [
    "Paint the boxes with the appropriate colors to reveal the hidden image.",
    "Draw the pixels",
    "Painted picture",
];

#[derive(Debug, Error, PartialEq)]
pub enum LanguageError {
    #[error("not a valid language file: expected {expected} lines, found {found}")]
    LineCount { expected: usize, found: usize },

    #[error("not a valid language file: line {line} is empty")]
    EmptyLine { line: usize },
}

/// Localized worksheet texts
///
/// A language file has 3 caption lines followed by one name per standard
/// palette color, in palette order.
#[derive(Debug, Clone, PartialEq)]
pub struct Texts {
    /// Language code the texts came from
    pub code: String,
    captions: Vec<String>,
    color_names: Vec<String>,
}

impl Texts {
    /// Built-in English texts
    pub fn english() -> Self {
        Self {
            code: "en".to_string(),
            captions: ENGLISH_CAPTIONS.iter().map(|s| s.to_string()).collect(),
            color_names: STANDARD_COLOR_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse a language file
    pub fn parse(code: &str, content: &str) -> Result<Self, LanguageError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let lines: Vec<&str> = content.trim_end().lines().map(str::trim).collect();

        let expected = CAPTION_LINES + MAX_PALETTE_COLORS;
        if lines.len() != expected {
            return Err(LanguageError::LineCount {
                expected,
                found: lines.len(),
            });
        }
        if let Some(pos) = lines.iter().position(|l| l.is_empty()) {
            return Err(LanguageError::EmptyLine { line: pos + 1 });
        }

        let (captions, names) = lines.split_at(CAPTION_LINES);
        Ok(Self {
            code: code.to_lowercase(),
            captions: captions.iter().map(|s| s.to_string()).collect(),
            color_names: names.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Load texts for a language code
    ///
    /// `None` and "en" give the built-in English texts. A missing or broken
    /// language file is logged and also gives English.
    pub fn load(loader: &AssetLoader, code: Option<&str>) -> Self {
        let code = match code.map(str::trim) {
            None => return Self::english(),
            Some(c) if c.is_empty() || c.eq_ignore_ascii_case("en") => return Self::english(),
            Some(c) => c,
        };

        let parsed = loader
            .read_lang_string(code)
            .map_err(|e| e.to_string())
            .and_then(|content| Self::parse(code, &content).map_err(|e| e.to_string()));

        match parsed {
            Ok(texts) => {
                tracing::debug!(language = %texts.code, "Loaded language file");
                texts
            }
            Err(e) => {
                tracing::warn!(language = %code, error = %e, "Error loading language file. English will be used");
                Self::english()
            }
        }
    }

    /// Coloring instructions shown above the legend
    pub fn instructions(&self) -> &str {
        &self.captions[0]
    }

    /// Title of the numbers sheet
    pub fn numbers_title(&self) -> &str {
        &self.captions[1]
    }

    /// Title of the colors sheet
    pub fn colors_title(&self) -> &str {
        &self.captions[2]
    }

    /// Localized name of a palette color
    ///
    /// Standard colors are translated by their standard position, so a
    /// custom palette still gets localized names where it can. Colors
    /// outside the standard set keep their palette name.
    pub fn color_name<'a>(&'a self, palette: &'a Palette, index: usize) -> &'a str {
        let name = palette.name(index);
        let key = |s: &str| s.replace(' ', "").to_lowercase();
        STANDARD_COLOR_NAMES
            .iter()
            .position(|standard| key(standard) == key(name))
            .map(|pos| self.color_names[pos].as_str())
            .unwrap_or(name)
    }
}

impl Default for Texts {
    fn default() -> Self {
        Self::english()
    }
}
