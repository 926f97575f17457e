//! Interactive region-selection overlay
//!
//! A modal, dimmed, topmost surface spanning the whole virtual desktop.
//! Drag state lives in an explicit finite-state machine (`state`) that is
//! fed serially by the Win32 message loop (`window`); the machine itself
//! has no Win32 dependency and is tested directly.

pub mod selection;
pub mod state;

#[cfg(windows)]
pub mod render;
#[cfg(windows)]
pub mod window;

pub use selection::{clamp_point, selection_rect, meets_minimum, MIN_SELECTION_SIZE};
pub use state::{step, Outcome, OverlayEvent, Phase, Step};

use capture_gdi::{Point, Rect};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("No display reported by the host")]
    NoDisplay,
}

pub type OverlayResult<T> = Result<T, OverlayError>;

/// What the user did with the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSelection {
    /// Completed drag meeting the minimum size
    Selected {
        /// Overlay-local selection rectangle
        local: Rect,
        /// Same rectangle offset into absolute desktop coordinates
        absolute: Rect,
    },
    /// Drag below the minimum dimensions
    TooSmall,
    /// Escape pressed
    Cancelled,
}

/// Offset an overlay-local rectangle by the virtual desktop origin.
pub fn to_absolute(local: Rect, origin: Point) -> Rect {
    Rect::new(origin.x + local.x, origin.y + local.y, local.width, local.height)
}

/// Run the overlay until a terminal outcome.
///
/// The overlay window is gone by the time this returns, so a subsequent
/// screen copy sees the real framebuffer rather than the dimmed chrome.
#[cfg(windows)]
pub fn select_region(prompt: &str) -> OverlayResult<RegionSelection> {
    let (outcome, desktop) = window::OverlayWindow::run(prompt)?;

    Ok(match outcome {
        Outcome::Completed(local) => RegionSelection::Selected {
            local,
            absolute: to_absolute(local, Point::new(desktop.x, desktop.y)),
        },
        Outcome::TooSmall => RegionSelection::TooSmall,
        Outcome::Cancelled => RegionSelection::Cancelled,
    })
}
