//! Test fixtures: scratch directories and generated images.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use tempfile::TempDir;

/// Colors used by the fixture images
pub mod colors {
    pub const WHITE: [u8; 3] = [255, 255, 255];
    pub const BLACK: [u8; 3] = [0, 0, 0];
    pub const RED: [u8; 3] = [255, 0, 0];
    pub const BLUE: [u8; 3] = [0, 0, 255];
    pub const NEAR_GOLD: [u8; 3] = [250, 210, 10];
}

/// A scratch directory that lives as long as the test
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Save `img` as a PNG and return its path
    pub fn image(&self, name: &str, img: &RgbImage) -> PathBuf {
        let path = self.join(name);
        img.save(&path).expect("save fixture image");
        path
    }

    /// Write a text file and return its path
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(&path, content).expect("write fixture file");
        path
    }
}

/// 30x17 picture: a white sky, a red house, a blue lake and a golden sun
pub fn landscape() -> RgbImage {
    RgbImage::from_fn(30, 17, |x, y| {
        if y >= 13 {
            image::Rgb(colors::BLUE)
        } else if (10..20).contains(&x) && y >= 6 {
            image::Rgb(colors::RED)
        } else if x >= 24 && y <= 4 {
            image::Rgb(colors::NEAR_GOLD)
        } else {
            image::Rgb(colors::WHITE)
        }
    })
}

/// Smooth gradient with many distinct colors
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x + y) * 5 % 256) as u8,
        ])
    })
}

/// One column: black over white
pub fn black_over_white() -> RgbImage {
    let mut img = RgbImage::from_pixel(1, 2, image::Rgb(colors::WHITE));
    img.put_pixel(0, 0, image::Rgb(colors::BLACK));
    img
}

/// Language file with numbered placeholder texts
pub fn language_file(captions: usize, names: usize) -> String {
    let mut lines: Vec<String> = (0..captions).map(|i| format!("Caption {i}")).collect();
    lines.extend((0..names).map(|i| format!("Color {i}")));
    lines.join("\n")
}
