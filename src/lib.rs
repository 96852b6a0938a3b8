//! RFox Layout Bugs
//!
//! Detectors that find layout bugs in a rendered web page by looking at its
//! pixels. A browser backend supplies a screenshot of the page and a mask of
//! which pixels belong to rendered text; detectors report what they find as
//! [`LayoutBug`]s.
//!
//! # Detectors
//!
//! - **Too low contrast** ([`TooLowContrastDetector`]): text whose glyphs do not
//!   stand out from their background per the WCAG 2.0 contrast ratio
//!
//! # Example
//!
//! ```no_run
//! use rflayoutbugs::{DetectorConfig, LayoutBugDetector, StaticPage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DetectorConfig {
//!     min_readable_contrast: 2.0,
//! };
//!
//! let detector = rflayoutbugs::new_detector(config)?;
//! let page = StaticPage::open("page.png", "text-pixels.png")?;
//! for bug in detector.find_layout_bugs_in(&page)? {
//!     println!("{} ({} pixels)", bug.description, bug.buggy_pixels.count());
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod color;
pub mod detector;
pub mod grid;
pub mod page;
pub mod report;

pub use color::{contrast_ratio, relative_luminance, Rgb};
pub use detector::{ContrastAnalysis, TooLowContrastDetector};
pub use grid::{Grid, PixelMask};
pub use page::{Screenshot, StaticPage, WebPage};
pub use report::{LayoutBugReport, Rect, RegionBuilder};

/// Configuration for the layout bug detectors
///
/// The default minimum readable contrast of `1.5` only catches text that is
/// nearly invisible. WCAG AA asks for `4.5` (or `3.0` for large text); raise
/// the value to be stricter.
///
/// # Examples
///
/// ```
/// let cfg = rflayoutbugs::DetectorConfig::default();
/// assert_eq!(cfg.min_readable_contrast, 1.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Smallest contrast ratio between a text pixel and its background that
    /// counts as readable, in `[1, 21]`
    pub min_readable_contrast: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_readable_contrast: 1.5,
        }
    }
}

impl DetectorConfig {
    /// Reject values outside the range a contrast ratio can take.
    pub fn validate(&self) -> Result<()> {
        let c = self.min_readable_contrast;
        if !c.is_finite() || c < 1.0 {
            return Err(Error::ConfigError(format!(
                "min_readable_contrast must be a finite ratio >= 1.0, got {}",
                c
            )));
        }
        Ok(())
    }

    /// Parse a JSON configuration; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DetectorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// A layout bug found on a page
///
/// Each detector reports at most one bug per page; the bug covers every
/// offending pixel of the page at once.
#[derive(Debug, Clone)]
pub struct LayoutBug {
    /// Human-readable description of the kind of bug
    pub description: String,
    /// [`Screenshot::fingerprint`] of the analyzed screenshot
    pub screenshot_fingerprint: String,
    /// Screenshot width in pixels
    pub width: usize,
    /// Screenshot height in pixels
    pub height: usize,
    /// Offending pixels
    pub buggy_pixels: PixelMask,
    /// Highlighted region derived from `buggy_pixels`
    pub region: Vec<Rect>,
}

impl LayoutBug {
    pub fn report(&self) -> LayoutBugReport {
        LayoutBugReport::from(self)
    }
}

/// Core trait for layout bug detectors
pub trait LayoutBugDetector {
    /// Analyze `page` and return the bugs found, if any
    fn find_layout_bugs_in(&self, page: &dyn WebPage) -> Result<Vec<LayoutBug>>;
}

/// Create the too-low-contrast detector with a validated configuration.
pub fn new_detector(config: DetectorConfig) -> Result<impl LayoutBugDetector> {
    TooLowContrastDetector::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.min_readable_contrast, 1.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_impossible_ratios() {
        for bad in [0.99, -1.0, f64::NAN, f64::INFINITY] {
            let config = DetectorConfig {
                min_readable_contrast: bad,
            };
            assert!(matches!(config.validate(), Err(Error::ConfigError(_))), "{}", bad);
        }
    }

    #[test]
    fn config_from_json_keeps_defaults_for_missing_fields() {
        assert_eq!(DetectorConfig::from_json_str("{}").unwrap(), DetectorConfig::default());
        let cfg = DetectorConfig::from_json_str(r#"{"min_readable_contrast": 4.5}"#).unwrap();
        assert_eq!(cfg.min_readable_contrast, 4.5);
        assert!(DetectorConfig::from_json_str(r#"{"min_readable_contrast": 0.5}"#).is_err());
        assert!(matches!(
            DetectorConfig::from_json_str("not json"),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn new_detector_validates() {
        assert!(new_detector(DetectorConfig {
            min_readable_contrast: 0.0
        })
        .is_err());
    }
}
