pub mod config;
pub mod texts;

pub use config::{AppConfig, CONFIG_ENV};
pub use texts::{LanguageError, Texts, CAPTION_LINES, ENGLISH_CAPTIONS};
