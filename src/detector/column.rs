//! Per-column contrast classification.
//!
//! Within one blob's vertical extent a column may cross several runs of text
//! pixels. Each run is compared against the background pixel directly above
//! and directly below it. Because glyph edges are anti-aliased, the pixel one
//! step inside the run is compared against the same background as well.
//!
//! One readable boundary anywhere in the column clears the whole column, even
//! when other runs in it are unreadable. Runs are located from the text mask
//! alone, so a lower run may belong to a different blob.

use crate::color::{contrast_ratio, Rgb};
use crate::grid::PixelMask;
use crate::page::Screenshot;

/// Decides whether columns of a page have readable text contrast.
#[derive(Debug, Clone, Copy)]
pub struct ColumnClassifier<'a> {
    screenshot: &'a Screenshot,
    text: &'a PixelMask,
    min_readable_contrast: f64,
}

impl<'a> ColumnClassifier<'a> {
    /// `screenshot` and `text` must have the same dimensions.
    pub fn new(screenshot: &'a Screenshot, text: &'a PixelMask, min_readable_contrast: f64) -> Self {
        debug_assert_eq!(screenshot.dimensions(), text.dimensions());
        Self {
            screenshot,
            text,
            min_readable_contrast,
        }
    }

    #[inline]
    fn readable(&self, x: usize, y: usize, background: Rgb) -> bool {
        contrast_ratio(self.screenshot.pixel(x, y), background) >= self.min_readable_contrast
    }

    /// `true` when no text/background boundary of column `x` within
    /// `min_y..=max_y` reaches the minimum readable contrast.
    ///
    /// `min_y` and `max_y` must both be text pixels of the column.
    pub fn is_low_contrast(&self, x: usize, (min_y, max_y): (usize, usize)) -> bool {
        let text = self.text;
        let h = text.height();
        debug_assert!(min_y <= max_y && max_y < h);
        debug_assert!(text[(x, min_y)] && text[(x, max_y)]);

        let mut y = min_y;
        loop {
            // y is the first pixel of a run
            if y > 0 {
                let background = self.screenshot.pixel(x, y - 1);
                if self.readable(x, y, background) {
                    return false;
                }
                y += 1;
                if y < h && text[(x, y)] && self.readable(x, y, background) {
                    return false;
                }
            }

            while y < h && text[(x, y)] {
                y += 1;
            }

            // y is the first pixel below the run
            if y < h {
                let background = self.screenshot.pixel(x, y);
                if self.readable(x, y - 1, background) {
                    return false;
                }
                if y >= 2 && text[(x, y - 2)] && self.readable(x, y - 2, background) {
                    return false;
                }
            }

            if y > max_y {
                return true;
            }

            // max_y is text, so this stops inside the extent
            while y < max_y && !text[(x, y)] {
                y += 1;
            }
        }
    }
}
