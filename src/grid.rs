//! Flat two-dimensional pixel grids.
//!
//! Cells are stored row-major in a single `Vec` and addressed as `(x, y)`.
//! Dimensions are validated once, at construction; afterwards every in-range
//! access is a plain slice index.

use std::ops::{Index, IndexMut};

use crate::{Error, Result};

/// A `width` x `height` grid of cells with `(x, y)` addressing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// One boolean per pixel: text pixels, visited pixels, buggy pixels.
pub type PixelMask = Grid<bool>;

fn check_area(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions(format!(
            "grid must have a non-zero area, got {}x{}",
            width, height
        )));
    }
    width.checked_mul(height).ok_or_else(|| {
        Error::InvalidDimensions(format!("grid of {}x{} cells is too large", width, height))
    })
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self> {
        let len = check_area(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![value; len],
        })
    }

    /// Set every cell back to `value` without reallocating.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl<T> Grid<T> {
    /// Wrap a row-major buffer of exactly `width * height` cells.
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Result<Self> {
        let len = check_area(width, height)?;
        if cells.len() != len {
            return Err(Error::InvalidDimensions(format!(
                "expected {} cells for a {}x{} grid, got {}",
                len,
                width,
                height,
                cells.len()
            )));
        }
        Ok(Self { width, height, cells })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        let len = check_area(width, height)?;
        let mut cells = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Whether `other` has the same dimensions as `self`.
    pub fn same_size<U>(&self, other: &Grid<U>) -> bool {
        self.dimensions() == other.dimensions()
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({}, {}) out of bounds", x, y);
        y * self.width + x
    }

    /// Checked access; `None` when `(x, y)` lies outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            self.cells.get(self.offset(x, y))
        } else {
            None
        }
    }

    /// Row-major view of all cells.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        &self.cells[self.offset(x, y)]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        let i = self.offset(x, y);
        &mut self.cells[i]
    }
}

impl PixelMask {
    /// An all-false mask.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, false)
    }

    /// Whether any pixel is set.
    pub fn any(&self) -> bool {
        self.cells.iter().any(|&b| b)
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count()
    }

    /// Coordinates of all set pixels in row-major order.
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(move |(i, _)| (i % w, i / w))
    }

    /// Whether every set pixel of `self` is also set in `other`.
    pub fn is_subset_of(&self, other: &PixelMask) -> bool {
        self.same_size(other)
            && self
                .cells
                .iter()
                .zip(other.cells.iter())
                .all(|(&a, &b)| !a || b)
    }
}
