//! Screen capture module using xcap library
//!
//! Copies the pixels of a screen-space rectangle into a new RGBA raster.

use image::RgbaImage;
use log::{debug, info};
use xcap::Monitor;

use crate::app::CaptureRegion;

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureError {
    /// The selected rectangle has no area
    InvalidRegion { width: i32, height: i32 },
    NoMonitor,
    MonitorQuery(String),
    CaptureFailed(String),
    /// The region does not intersect the monitor it starts on
    OutsideMonitor,
}

impl std::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRegion { .. } => {
                write!(f, "Invalid capture area. Please select a valid region.")
            }
            Self::NoMonitor => write!(f, "Error capturing screen: no monitor found"),
            Self::MonitorQuery(msg) => write!(f, "Error capturing screen: {}", msg),
            Self::CaptureFailed(msg) => write!(f, "Error capturing screen: {}", msg),
            Self::OutsideMonitor => {
                write!(f, "Error capturing screen: region is outside the monitor")
            }
        }
    }
}

impl std::error::Error for CaptureError {}

/// Information about a monitor
#[derive(Debug, Clone)]
pub struct MonitorInfo {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub scale_factor: f32,
}

impl MonitorInfo {
    fn from_xcap(monitor: &Monitor) -> Result<Self, CaptureError> {
        let query = |e: xcap::XCapError| CaptureError::MonitorQuery(e.to_string());
        Ok(Self {
            name: monitor.name().map_err(query)?,
            x: monitor.x().map_err(query)?,
            y: monitor.y().map_err(query)?,
            scale_factor: monitor.scale_factor().map_err(query)?,
        })
    }
}

/// Map a screen-space region to a pixel rectangle inside a monitor frame.
///
/// `frame_width`/`frame_height` are the dimensions of the captured monitor
/// image, which are physical pixels on scaled displays. Returns `None` when
/// nothing of the region lies inside the frame.
pub fn monitor_crop(
    region: &CaptureRegion,
    monitor: &MonitorInfo,
    frame_width: u32,
    frame_height: u32,
) -> Option<(u32, u32, u32, u32)> {
    let scale = if monitor.scale_factor > 0.0 {
        monitor.scale_factor as f64
    } else {
        1.0
    };

    let to_px = |v: i32| (v as f64 * scale).round() as i64;
    let left = to_px(region.x - monitor.x).max(0);
    let top = to_px(region.y - monitor.y).max(0);
    let right = to_px(region.x - monitor.x + region.width).min(frame_width as i64);
    let bottom = to_px(region.y - monitor.y + region.height).min(frame_height as i64);

    if right <= left || bottom <= top {
        return None;
    }

    Some((
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    ))
}

/// Capture the pixels under `region` from the monitor containing its origin
pub fn capture_region(region: &CaptureRegion) -> Result<RgbaImage, CaptureError> {
    if !region.is_valid() {
        return Err(CaptureError::InvalidRegion {
            width: region.width,
            height: region.height,
        });
    }

    let monitor = match Monitor::from_point(region.x, region.y) {
        Ok(monitor) => monitor,
        Err(e) => {
            debug!("No monitor at ({}, {}): {}", region.x, region.y, e);
            primary_monitor()?
        }
    };
    let info = MonitorInfo::from_xcap(&monitor)?;

    let frame = monitor
        .capture_image()
        .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

    let (x, y, width, height) = monitor_crop(region, &info, frame.width(), frame.height())
        .ok_or(CaptureError::OutsideMonitor)?;

    info!(
        "Captured {}x{} at ({}, {}) from monitor {}",
        width, height, x, y, info.name
    );
    Ok(image::imageops::crop_imm(&frame, x, y, width, height).to_image())
}

fn primary_monitor() -> Result<Monitor, CaptureError> {
    let monitors = Monitor::all().map_err(|e| CaptureError::MonitorQuery(e.to_string()))?;
    let primary = monitors
        .iter()
        .position(|m| m.is_primary().unwrap_or(false))
        .unwrap_or(0);
    monitors
        .into_iter()
        .nth(primary)
        .ok_or(CaptureError::NoMonitor)
}
