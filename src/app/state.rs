//! Region-selection state machine
//!
//! The overlay moves through `Idle -> Selecting -> Capturing -> Idle`. Every
//! transition returns the list of [`OverlayAction`]s the UI has to apply, built
//! from the exit actions of the old phase followed by the enter actions of the
//! new one. Widgets never decide on their own when to show or hide.

use log::debug;

use crate::capture::CaptureError;

/// A rectangle in screen coordinates
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CaptureRegion {
    /// Normalize two corner points into a region with non-negative size
    pub fn from_points(anchor: (i32, i32), current: (i32, i32)) -> Self {
        Self {
            x: anchor.0.min(current.0),
            y: anchor.1.min(current.1),
            width: (anchor.0 - current.0).abs(),
            height: (anchor.1 - current.1).abs(),
        }
    }

    /// Only regions with both dimensions positive can be captured
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Shift the origin, e.g. from overlay-local to screen coordinates
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// A drag gesture in progress on the overlay
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl Selection {
    /// Create a new selection anchored at the given point
    pub fn new(start_x: f64, start_y: f64) -> Self {
        Self {
            start_x,
            start_y,
            end_x: start_x,
            end_y: start_y,
        }
    }

    /// Update the moving corner of the selection
    pub fn update_end(&mut self, end_x: f64, end_y: f64) {
        self.end_x = end_x;
        self.end_y = end_y;
    }

    /// Pixel-snapped, normalized region for this selection
    pub fn region(&self) -> CaptureRegion {
        CaptureRegion::from_points(
            (self.start_x.floor() as i32, self.start_y.floor() as i32),
            (self.end_x.floor() as i32, self.end_y.floor() as i32),
        )
    }
}

/// Side effects the UI performs on a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayAction {
    HideLauncher,
    ShowLauncher,
    ShowOverlay,
    HideOverlay,
    StartHoverPoll,
    StopHoverPoll,
    Redraw,
}

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub enum CapturePhase {
    #[default]
    Idle,
    Selecting {
        selection: Option<Selection>,
        dragging: bool,
    },
    /// Overlay hidden, waiting for the settle delay before reading pixels
    Capturing(CaptureRegion),
}

impl CapturePhase {
    fn enter_actions(&self) -> &'static [OverlayAction] {
        match self {
            CapturePhase::Idle => &[OverlayAction::ShowLauncher],
            CapturePhase::Selecting { .. } => &[
                OverlayAction::HideLauncher,
                OverlayAction::ShowOverlay,
                OverlayAction::StartHoverPoll,
            ],
            CapturePhase::Capturing(_) => &[],
        }
    }

    fn exit_actions(&self) -> &'static [OverlayAction] {
        match self {
            CapturePhase::Idle => &[],
            CapturePhase::Selecting { .. } => {
                &[OverlayAction::StopHoverPoll, OverlayAction::HideOverlay]
            }
            CapturePhase::Capturing(_) => &[],
        }
    }

    fn name(&self) -> &'static str {
        match self {
            CapturePhase::Idle => "idle",
            CapturePhase::Selecting { .. } => "selecting",
            CapturePhase::Capturing(_) => "capturing",
        }
    }
}

/// What a pointer release led to
#[derive(Debug, PartialEq)]
pub enum ReleaseOutcome {
    /// Not selecting, or no drag was in progress
    Ignored,
    /// Overlay is hidden; capture this region after the settle delay
    Capture(CaptureRegion),
    /// The rectangle was empty; the session is back to idle
    Rejected(CaptureError),
}

#[derive(Debug, PartialEq)]
pub struct Release {
    pub actions: Vec<OverlayAction>,
    pub outcome: ReleaseOutcome,
}

/// Capture overlay state shared by the UI handlers
#[derive(Debug, Default)]
pub struct CaptureSession {
    phase: CapturePhase,
    pointer_y: Option<f64>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn phase(&self) -> &CapturePhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == CapturePhase::Idle
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.phase, CapturePhase::Selecting { .. })
    }

    /// Current rectangle while a drag is in progress, for drawing the outline
    pub fn active_region(&self) -> Option<CaptureRegion> {
        match self.phase {
            CapturePhase::Selecting {
                selection: Some(sel),
                dragging: true,
            } => Some(sel.region()),
            _ => None,
        }
    }

    fn transition(&mut self, next: CapturePhase) -> Vec<OverlayAction> {
        debug!("Capture phase {} -> {}", self.phase.name(), next.name());
        let mut actions = self.phase.exit_actions().to_vec();
        actions.extend_from_slice(next.enter_actions());
        self.phase = next;
        actions
    }

    /// "Start Capture": only valid from idle
    pub fn start(&mut self) -> Vec<OverlayAction> {
        if !self.is_idle() {
            return Vec::new();
        }
        self.pointer_y = None;
        self.transition(CapturePhase::Selecting {
            selection: None,
            dragging: false,
        })
    }

    /// Abort the selection without producing an image
    pub fn cancel(&mut self) -> Vec<OverlayAction> {
        if !self.is_selecting() {
            return Vec::new();
        }
        self.transition(CapturePhase::Idle)
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> Vec<OverlayAction> {
        match &mut self.phase {
            CapturePhase::Selecting {
                selection,
                dragging,
            } => {
                *selection = Some(Selection::new(x, y));
                *dragging = true;
                vec![OverlayAction::Redraw]
            }
            _ => Vec::new(),
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Vec<OverlayAction> {
        match &mut self.phase {
            CapturePhase::Selecting {
                selection: Some(sel),
                dragging: true,
            } => {
                sel.update_end(x, y);
                vec![OverlayAction::Redraw]
            }
            _ => Vec::new(),
        }
    }

    /// Freeze the rectangle and leave the selecting phase
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Release {
        let region = match &mut self.phase {
            CapturePhase::Selecting {
                selection: Some(sel),
                dragging: true,
            } => {
                sel.update_end(x, y);
                sel.region()
            }
            _ => {
                return Release {
                    actions: Vec::new(),
                    outcome: ReleaseOutcome::Ignored,
                }
            }
        };

        if region.is_valid() {
            Release {
                actions: self.transition(CapturePhase::Capturing(region)),
                outcome: ReleaseOutcome::Capture(region),
            }
        } else {
            Release {
                actions: self.transition(CapturePhase::Idle),
                outcome: ReleaseOutcome::Rejected(CaptureError::InvalidRegion {
                    width: region.width,
                    height: region.height,
                }),
            }
        }
    }

    /// Return to idle after a capture attempt, whatever its result
    pub fn finish(&mut self) -> Vec<OverlayAction> {
        match self.phase {
            CapturePhase::Capturing(_) => self.transition(CapturePhase::Idle),
            _ => Vec::new(),
        }
    }

    /// Record the latest pointer position seen over the overlay
    pub fn track_pointer(&mut self, y: f64) {
        self.pointer_y = Some(y);
    }

    /// Whether the hover-activated cancel button should be visible
    pub fn cancel_visible(&self, hover_zone: f64) -> bool {
        self.is_selecting() && self.pointer_y.map_or(true, |y| y <= hover_zone)
    }
}
