//! Error types for the layout bug detectors

use thiserror::Error;

/// Result type alias for detector operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while analyzing a page
#[derive(Error, Debug)]
pub enum Error {
    /// A grid has zero area or its buffer does not hold width * height cells
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Screenshot and text mask disagree on their size
    #[error(
        "Dimension mismatch: screenshot is {}x{} but text pixels are {}x{}",
        .screenshot.0,
        .screenshot.1,
        .text_pixels.0,
        .text_pixels.1
    )]
    DimensionMismatch {
        screenshot: (usize, usize),
        text_pixels: (usize, usize),
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to decode or encode an image
    #[error("Image error: {0}")]
    ImageError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_message_names_both_sizes() {
        let err = Error::DimensionMismatch {
            screenshot: (640, 480),
            text_pixels: (640, 479),
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: screenshot is 640x480 but text pixels are 640x479"
        );
    }
}
