//! Detection of text rendered with too low contrast against its background.
//!
//! The page is scanned column by column. Every unvisited text pixel starts a
//! flood fill that yields one blob; each column the blob spans is classified
//! by [`ColumnClassifier`], and a blob is only reported once enough adjacent
//! columns are low-contrast. All flagged pixels of the page are collected in
//! one mask, which becomes at most one [`LayoutBug`].

use log::{debug, info, trace};

use crate::detector::blob::{Blob, BlobExtractor};
use crate::detector::column::ColumnClassifier;
use crate::grid::PixelMask;
use crate::page::{check_dimensions, Screenshot, WebPage};
use crate::report::{BoundingBoxRegion, RegionBuilder};
use crate::{DetectorConfig, LayoutBug, LayoutBugDetector, Result};

/// Description attached to every reported bug
pub const DESCRIPTION: &str = "Detected text with too low contrast.";

/// Blobs narrower than this are anti-aliasing artifacts and never flagged.
pub const MIN_BLOB_WIDTH: usize = 4;

/// Consecutive low-contrast columns needed before a blob is flagged (capped at
/// the blob's width).
pub const MIN_BUGGY_COLUMNS: usize = 10;

/// Outcome of scanning one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContrastAnalysis {
    /// Text pixels with too low contrast
    pub buggy_pixels: PixelMask,
    /// Number of blobs found by flood fill
    pub blobs_examined: usize,
    /// Blobs skipped because they were narrower than [`MIN_BLOB_WIDTH`]
    pub blobs_too_narrow: usize,
    /// Blobs that contributed at least one buggy pixel
    pub blobs_flagged: usize,
}

impl ContrastAnalysis {
    pub fn found_buggy_pixels(&self) -> bool {
        self.buggy_pixels.any()
    }

    pub fn buggy_pixel_count(&self) -> usize {
        self.buggy_pixels.count()
    }
}

/// State of one page scan. Owns the visited mask (inside the extractor) and
/// the buggy mask; nothing outlives [`Analyzer::run`].
struct Analyzer<'a> {
    text: &'a PixelMask,
    classifier: ColumnClassifier<'a>,
    extractor: BlobExtractor,
    buggy_pixels: PixelMask,
    blobs_examined: usize,
    blobs_too_narrow: usize,
    blobs_flagged: usize,
}

impl<'a> Analyzer<'a> {
    fn new(screenshot: &'a Screenshot, text: &'a PixelMask, min_readable_contrast: f64) -> Result<Self> {
        check_dimensions(screenshot, text)?;
        let (w, h) = text.dimensions();
        Ok(Self {
            text,
            classifier: ColumnClassifier::new(screenshot, text, min_readable_contrast),
            extractor: BlobExtractor::new(w, h)?,
            buggy_pixels: PixelMask::new(w, h)?,
            blobs_examined: 0,
            blobs_too_narrow: 0,
            blobs_flagged: 0,
        })
    }

    fn run(mut self) -> ContrastAnalysis {
        let (w, h) = self.text.dimensions();
        // Columns outermost, so blobs are discovered left to right.
        for x in 0..w {
            for y in 0..h {
                if self.text[(x, y)] && !self.extractor.is_visited(x, y) {
                    let blob = self.extractor.extract(self.text, x, y);
                    self.blobs_examined += 1;
                    if self.handle_blob(blob) {
                        self.blobs_flagged += 1;
                        trace!("blob at columns {}..={} has too low contrast", blob.min_x, blob.max_x);
                    }
                }
            }
        }

        let analysis = ContrastAnalysis {
            buggy_pixels: self.buggy_pixels,
            blobs_examined: self.blobs_examined,
            blobs_too_narrow: self.blobs_too_narrow,
            blobs_flagged: self.blobs_flagged,
        };
        debug!(
            "contrast scan of {}x{} page: {} blobs, {} too narrow, {} flagged, {} buggy pixels",
            w,
            h,
            analysis.blobs_examined,
            analysis.blobs_too_narrow,
            analysis.blobs_flagged,
            analysis.buggy_pixel_count()
        );
        analysis
    }

    fn column_is_low_contrast(&self, x: usize) -> bool {
        match self.extractor.extents().extent(x) {
            Some(extent) => self.classifier.is_low_contrast(x, extent),
            None => false,
        }
    }

    /// Mark the blob's columns that belong to a long enough low-contrast
    /// stretch. Returns whether anything was marked.
    fn handle_blob(&mut self, blob: Blob) -> bool {
        let width = blob.width();
        if width < MIN_BLOB_WIDTH {
            self.blobs_too_narrow += 1;
            return false;
        }
        let threshold = MIN_BUGGY_COLUMNS.min(width);

        let mut flagged = false;
        let mut consecutive = 0;
        let mut x = blob.min_x;
        while x <= blob.max_x {
            if !self.column_is_low_contrast(x) {
                consecutive = 0;
                x += 1;
                continue;
            }
            consecutive += 1;
            if consecutive == threshold {
                flagged = true;
                for col in (x + 1 - threshold)..=x {
                    self.mark_column(col);
                }
                // The rest of the stretch is marked without re-counting.
                x += 1;
                while x <= blob.max_x && self.column_is_low_contrast(x) {
                    self.mark_column(x);
                    x += 1;
                }
                consecutive = 0;
            }
            // Either the next column, or past the column that ended the stretch.
            x += 1;
        }
        flagged
    }

    fn mark_column(&mut self, x: usize) {
        if let Some((min_y, max_y)) = self.extractor.extents().extent(x) {
            for y in min_y..=max_y {
                if self.text[(x, y)] {
                    self.buggy_pixels[(x, y)] = true;
                }
            }
        }
    }
}

/// Reports text whose glyphs barely stand out from the background.
pub struct TooLowContrastDetector {
    config: DetectorConfig,
    region_builder: Box<dyn RegionBuilder + Send + Sync>,
}

impl TooLowContrastDetector {
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            region_builder: Box::new(BoundingBoxRegion),
        })
    }

    /// Replace the default [`BoundingBoxRegion`] used to outline reported bugs.
    pub fn with_region_builder<R>(mut self, region_builder: R) -> Self
    where
        R: RegionBuilder + Send + Sync + 'static,
    {
        self.region_builder = Box::new(region_builder);
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Scan a page and return every text pixel with too low contrast.
    pub fn analyze(&self, screenshot: &Screenshot, text_pixels: &PixelMask) -> Result<ContrastAnalysis> {
        let analyzer = Analyzer::new(screenshot, text_pixels, self.config.min_readable_contrast)?;
        Ok(analyzer.run())
    }
}

impl Default for TooLowContrastDetector {
    fn default() -> Self {
        Self {
            config: DetectorConfig::default(),
            region_builder: Box::new(BoundingBoxRegion),
        }
    }
}

impl std::fmt::Debug for TooLowContrastDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TooLowContrastDetector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LayoutBugDetector for TooLowContrastDetector {
    fn find_layout_bugs_in(&self, page: &dyn WebPage) -> Result<Vec<LayoutBug>> {
        let screenshot = page.screenshot()?;
        let text_pixels = page.text_pixels()?;
        let analysis = self.analyze(screenshot, text_pixels)?;
        if !analysis.found_buggy_pixels() {
            return Ok(Vec::new());
        }

        let region = self.region_builder.build_region(&analysis.buggy_pixels);
        let (width, height) = screenshot.dimensions();
        info!(
            "{} ({} pixels in {} blobs)",
            DESCRIPTION,
            analysis.buggy_pixel_count(),
            analysis.blobs_flagged
        );
        Ok(vec![LayoutBug {
            description: DESCRIPTION.to_string(),
            screenshot_fingerprint: screenshot.fingerprint(),
            width,
            height,
            buggy_pixels: analysis.buggy_pixels,
            region,
        }])
    }
}
