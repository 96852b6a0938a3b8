//! Turning buggy-pixel masks into reportable regions and artifacts

use std::collections::VecDeque;

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::grid::PixelMask;
use crate::page::{check_dimensions, Screenshot};
use crate::{LayoutBug, Result};

/// Color used to paint buggy pixels onto a marked screenshot
pub const MARK_COLOR: Rgb = Rgb::new(255, 0, 0);

/// An axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Derives the highlighted region of a bug from its buggy pixels.
pub trait RegionBuilder {
    /// Rectangles that together cover every set pixel of `buggy_pixels`
    fn build_region(&self, buggy_pixels: &PixelMask) -> Vec<Rect>;
}

/// One bounding rectangle per 8-connected group of buggy pixels, in the
/// row-major order the groups are first met.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundingBoxRegion;

impl RegionBuilder for BoundingBoxRegion {
    fn build_region(&self, buggy_pixels: &PixelMask) -> Vec<Rect> {
        let (w, h) = buggy_pixels.dimensions();
        let mut seen = vec![false; w * h];
        let mut worklist = VecDeque::new();
        let mut rects = Vec::new();

        for (x0, y0) in buggy_pixels.iter_set() {
            if seen[y0 * w + x0] {
                continue;
            }
            seen[y0 * w + x0] = true;
            worklist.push_back((x0, y0));
            let (mut min_x, mut max_x, mut min_y, mut max_y) = (x0, x0, y0, y0);

            while let Some((x, y)) = worklist.pop_front() {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
                for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                    for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                        if buggy_pixels[(nx, ny)] && !seen[ny * w + nx] {
                            seen[ny * w + nx] = true;
                            worklist.push_back((nx, ny));
                        }
                    }
                }
            }

            rects.push(Rect {
                x: min_x,
                y: min_y,
                width: max_x - min_x + 1,
                height: max_y - min_y + 1,
            });
        }
        rects
    }
}

/// Serializable summary of a [`LayoutBug`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutBugReport {
    pub description: String,
    pub screenshot_fingerprint: String,
    pub width: usize,
    pub height: usize,
    pub buggy_pixel_count: usize,
    pub region: Vec<Rect>,
}

impl From<&LayoutBug> for LayoutBugReport {
    fn from(bug: &LayoutBug) -> Self {
        Self {
            description: bug.description.clone(),
            screenshot_fingerprint: bug.screenshot_fingerprint.clone(),
            width: bug.width,
            height: bug.height,
            buggy_pixel_count: bug.buggy_pixels.count(),
            region: bug.region.clone(),
        }
    }
}

/// The screenshot with every buggy pixel painted [`MARK_COLOR`].
pub fn mark_buggy_pixels(screenshot: &Screenshot, buggy_pixels: &PixelMask) -> Result<RgbImage> {
    check_dimensions(screenshot, buggy_pixels)?;
    let mut image = screenshot.to_rgb_image();
    for (x, y) in buggy_pixels.iter_set() {
        image.put_pixel(x as u32, y as u32, image::Rgb(MARK_COLOR.into()));
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(w: usize, h: usize, set: &[(usize, usize)]) -> PixelMask {
        let mut m = PixelMask::new(w, h).unwrap();
        for &p in set {
            m[p] = true;
        }
        m
    }

    #[test]
    fn empty_mask_has_no_region() {
        assert!(BoundingBoxRegion.build_region(&mask(4, 4, &[])).is_empty());
    }

    #[test]
    fn each_connected_group_gets_its_own_rectangle() {
        // (2, 1) and (3, 2) touch diagonally; (5, 2) stands alone
        let m = mask(10, 8, &[(2, 1), (5, 2), (3, 2), (7, 5), (8, 7)]);
        let region = BoundingBoxRegion.build_region(&m);
        assert_eq!(
            region,
            vec![
                Rect { x: 2, y: 1, width: 2, height: 2 },
                Rect { x: 5, y: 2, width: 1, height: 1 },
                Rect { x: 7, y: 5, width: 1, height: 1 },
                Rect { x: 8, y: 7, width: 1, height: 1 },
            ]
        );
        for (x, y) in m.iter_set() {
            assert!(region.iter().any(|r| r.contains(x, y)));
        }
    }

    #[test]
    fn groups_on_the_same_rows_are_not_merged() {
        let mut m = PixelMask::new(100, 10).unwrap();
        for x in (2..8).chain(90..96) {
            for y in 3..6 {
                m[(x, y)] = true;
            }
        }
        let region = BoundingBoxRegion.build_region(&m);
        assert_eq!(
            region,
            vec![
                Rect { x: 2, y: 3, width: 6, height: 3 },
                Rect { x: 90, y: 3, width: 6, height: 3 },
            ]
        );
        assert!(!region.iter().any(|r| r.contains(50, 4)));
    }

    #[test]
    fn marked_screenshot_paints_only_buggy_pixels() {
        let shot = Screenshot::from_fn(3, 3, |_, _| Rgb::WHITE).unwrap();
        let m = mask(3, 3, &[(1, 1)]);
        let img = mark_buggy_pixels(&shot, &m).unwrap();
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(0, 1).0, [255, 255, 255]);
        assert!(mark_buggy_pixels(&shot, &mask(3, 2, &[])).is_err());
    }
}
