//! Rasterized page screenshots

use std::path::Path;

use image::{DynamicImage, RgbImage};
use sha2::{Digest, Sha256};

use crate::color::Rgb;
use crate::grid::Grid;
use crate::Result;

/// An immutable `width` x `height` grid of opaque page colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    pixels: Grid<Rgb>,
}

impl Screenshot {
    pub fn new(pixels: Grid<Rgb>) -> Self {
        Self { pixels }
    }

    /// Build a screenshot by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        Ok(Self::new(Grid::from_fn(width, height, f)?))
    }

    /// Convert a decoded image; alpha, if present, is dropped.
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let rgb = image.to_rgb8();
        let (w, h) = rgb.dimensions();
        let cells = rgb.pixels().map(|p| Rgb::from(p.0)).collect();
        Ok(Self::new(Grid::from_vec(w as usize, h as usize, cells)?))
    }

    /// Decode a screenshot from an image file (PNG or JPEG).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = image::open(path)?;
        Self::from_image(&image)
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.pixels.dimensions()
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[(x, y)]
    }

    /// Hex SHA-256 over the dimensions and the row-major RGB bytes.
    ///
    /// Two screenshots share a fingerprint exactly when they are pixel-identical.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.width() as u64).to_le_bytes());
        hasher.update((self.height() as u64).to_le_bytes());
        for p in self.pixels.as_slice() {
            hasher.update([p.r, p.g, p.b]);
        }
        hex::encode(hasher.finalize())
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            image::Rgb(self.pixel(x as usize, y as usize).into())
        })
    }
}
