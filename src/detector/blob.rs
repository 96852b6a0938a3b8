//! Connected text-pixel blobs.
//!
//! A blob is a maximal 4-connected region of text pixels. The extractor flood
//! fills one blob at a time with an explicit FIFO worklist, so stack usage does
//! not depend on the blob's shape, and records per column the topmost and
//! bottommost row the blob occupies.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use crate::grid::PixelMask;
use crate::Result;

/// Horizontal extent of one blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blob {
    pub min_x: usize,
    pub max_x: usize,
}

impl Blob {
    /// Number of columns spanned, `max_x - min_x + 1`.
    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    pub fn columns(&self) -> RangeInclusive<usize> {
        self.min_x..=self.max_x
    }
}

/// Per-column vertical extent of the current blob.
///
/// A column the blob does not touch holds `min_y = height` and `max_y = 0`,
/// i.e. `min_y > max_y`.
#[derive(Debug, Clone)]
pub struct ColumnExtents {
    min_y: Vec<usize>,
    max_y: Vec<usize>,
    height: usize,
}

impl ColumnExtents {
    fn new(width: usize, height: usize) -> Self {
        Self {
            min_y: vec![height; width],
            max_y: vec![0; width],
            height,
        }
    }

    fn reset(&mut self, columns: RangeInclusive<usize>) {
        for x in columns {
            self.min_y[x] = self.height;
            self.max_y[x] = 0;
        }
    }

    #[inline]
    fn include(&mut self, x: usize, y: usize) {
        if y < self.min_y[x] {
            self.min_y[x] = y;
        }
        if y > self.max_y[x] {
            self.max_y[x] = y;
        }
    }

    /// `(min_y, max_y)` of column `x`, or `None` if the blob does not reach it.
    pub fn extent(&self, x: usize) -> Option<(usize, usize)> {
        let (lo, hi) = (self.min_y[x], self.max_y[x]);
        (lo <= hi).then_some((lo, hi))
    }
}

/// Flood fills blobs out of a text mask.
///
/// The visited mask and the column extents live for the whole page scan; the
/// extents are cleared for the previous blob's columns before each fill
/// instead of being reallocated.
#[derive(Debug)]
pub struct BlobExtractor {
    visited: PixelMask,
    extents: ColumnExtents,
    worklist: VecDeque<(usize, usize)>,
    previous: Option<Blob>,
}

impl BlobExtractor {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            visited: PixelMask::new(width, height)?,
            extents: ColumnExtents::new(width, height),
            worklist: VecDeque::new(),
            previous: None,
        })
    }

    #[inline]
    pub fn is_visited(&self, x: usize, y: usize) -> bool {
        self.visited[(x, y)]
    }

    pub fn visited(&self) -> &PixelMask {
        &self.visited
    }

    /// Extents of the blob returned by the last [`BlobExtractor::extract`].
    pub fn extents(&self) -> &ColumnExtents {
        &self.extents
    }

    /// Flood fill the blob containing `(x0, y0)`, which must be an unvisited
    /// text pixel, marking each of its pixels visited.
    pub fn extract(&mut self, text: &PixelMask, x0: usize, y0: usize) -> Blob {
        debug_assert!(text.same_size(&self.visited));
        debug_assert!(text[(x0, y0)] && !self.visited[(x0, y0)]);

        if let Some(prev) = self.previous.take() {
            self.extents.reset(prev.columns());
        }

        let (w, h) = text.dimensions();
        let mut blob = Blob { min_x: x0, max_x: x0 };
        self.worklist.clear();
        self.worklist.push_back((x0, y0));

        while let Some((x, y)) = self.worklist.pop_front() {
            // A pixel can be queued by several neighbors before it is handled.
            if self.visited[(x, y)] {
                continue;
            }
            self.visited[(x, y)] = true;
            self.extents.include(x, y);
            blob.min_x = blob.min_x.min(x);
            blob.max_x = blob.max_x.max(x);

            // up, right, down, left
            if y > 0 {
                self.enqueue(text, x, y - 1);
            }
            if x + 1 < w {
                self.enqueue(text, x + 1, y);
            }
            if y + 1 < h {
                self.enqueue(text, x, y + 1);
            }
            if x > 0 {
                self.enqueue(text, x - 1, y);
            }
        }

        self.previous = Some(blob);
        blob
    }

    #[inline]
    fn enqueue(&mut self, text: &PixelMask, x: usize, y: usize) {
        if text[(x, y)] && !self.visited[(x, y)] {
            self.worklist.push_back((x, y));
        }
    }
}
