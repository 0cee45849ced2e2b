//! Pixel Worksheet
//!
//! Turns pictures into color-by-number spreadsheets for kids.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod services;
