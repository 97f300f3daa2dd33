//! Application module
//!
//! Capture state machine and fixed application settings.

pub mod config;
mod state;

pub use config::{Action, AppConfig, ShortcutConfig};
pub use state::{CaptureRegion, CaptureSession, OverlayAction, ReleaseOutcome};
