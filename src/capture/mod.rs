//! Capture module for screen region capture
//!
//! Wraps the xcap library; callers deal only in `CaptureRegion` and
//! `image::RgbaImage`.

pub mod screen;

pub use screen::{capture_region, CaptureError};
