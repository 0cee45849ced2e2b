//! Assertion helpers for tests.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

/// Assert `path` holds a workbook (xlsx files are zip archives)
pub fn assert_xlsx(path: &Path) {
    let bytes = fs::read(path)
        .unwrap_or_else(|e| panic!("Expected workbook at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(b"PK\x03\x04"),
        "Expected zip archive, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..4.min(bytes.len())]
    );
}

/// Assert `path` holds a PNG of the given size and return its pixels
pub fn assert_png(path: &Path, width: u32, height: u32) -> image::RgbImage {
    let bytes = fs::read(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G']),
        "Expected PNG signature, got {:?}",
        &bytes[..8.min(bytes.len())]
    );
    let img = image::load_from_memory(&bytes)
        .expect("decode PNG")
        .to_rgb8();
    assert_eq!(img.dimensions(), (width, height), "PNG dimensions");
    img
}

/// Assert nothing was written at `path`
pub fn assert_missing(path: &Path) {
    assert!(!path.exists(), "Expected no file at {}", path.display());
}
