//! Layout bug detectors and the pixel-level building blocks they share

pub mod blob;
pub mod column;
pub mod contrast;

pub use contrast::{ContrastAnalysis, TooLowContrastDetector};
