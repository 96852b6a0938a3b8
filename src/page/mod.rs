//! Page inputs: the rendered screenshot and the mask of text pixels.
//!
//! Capturing screenshots and computing text masks belongs to the browser
//! backend. Detectors only see a page through the [`WebPage`] trait, so any
//! backend (a live browser, a cache, files on disk) can feed them.

pub mod screenshot;
pub mod text_pixels;

use std::path::Path;

pub use screenshot::Screenshot;

use crate::grid::PixelMask;
use crate::{Error, Result};

/// Source of the pixel data a layout bug detector analyzes.
pub trait WebPage {
    /// The page as rendered, one color per pixel
    fn screenshot(&self) -> Result<&Screenshot>;

    /// `true` where the pixel belongs to rendered text. Same size as
    /// [`WebPage::screenshot`].
    fn text_pixels(&self) -> Result<&PixelMask>;
}

/// Ensure a screenshot and text mask describe the same page area.
pub fn check_dimensions(screenshot: &Screenshot, text_pixels: &PixelMask) -> Result<()> {
    if screenshot.dimensions() != text_pixels.dimensions() {
        return Err(Error::DimensionMismatch {
            screenshot: screenshot.dimensions(),
            text_pixels: text_pixels.dimensions(),
        });
    }
    Ok(())
}

/// A page whose pixels were captured up front.
#[derive(Debug, Clone)]
pub struct StaticPage {
    screenshot: Screenshot,
    text_pixels: PixelMask,
}

impl StaticPage {
    pub fn new(screenshot: Screenshot, text_pixels: PixelMask) -> Result<Self> {
        check_dimensions(&screenshot, &text_pixels)?;
        Ok(Self {
            screenshot,
            text_pixels,
        })
    }

    /// Load a screenshot and a text mask image from disk.
    pub fn open<P, Q>(screenshot_path: P, text_mask_path: Q) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let screenshot = Screenshot::open(screenshot_path)?;
        let text_pixels = text_pixels::open(text_mask_path)?;
        Self::new(screenshot, text_pixels)
    }

    pub fn into_parts(self) -> (Screenshot, PixelMask) {
        (self.screenshot, self.text_pixels)
    }
}

impl WebPage for StaticPage {
    fn screenshot(&self) -> Result<&Screenshot> {
        Ok(&self.screenshot)
    }

    fn text_pixels(&self) -> Result<&PixelMask> {
        Ok(&self.text_pixels)
    }
}
