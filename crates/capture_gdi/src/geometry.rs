//! Virtual desktop geometry resolver
//!
//! Pure queries over host-provided display state. The provider trait keeps
//! the resolver testable against simulated layouts (negative origins,
//! multi-monitor, no displays) without a real desktop.

use crate::Rect;

/// One attached display, in platform enumeration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayDescriptor {
    pub index: usize,
    pub bounds: Rect,
}

/// Source of attached-display state
pub trait DisplayProvider {
    fn displays(&self) -> Vec<DisplayDescriptor>;
}

/// Smallest rectangle containing all display rectangles.
///
/// Degenerate empty rectangle when the host reports no displays.
pub fn virtual_desktop_bounds(displays: &[DisplayDescriptor]) -> Rect {
    let mut iter = displays.iter();
    let first = match iter.next() {
        Some(d) => d.bounds,
        None => return Rect::default(),
    };
    iter.fold(first, |acc, d| acc.union(&d.bounds))
}

/// Bounds of a specific display by 0-based enumeration index.
///
/// No displays reported falls back to the full virtual desktop; an
/// out-of-range index falls back to display 0.
pub fn display_bounds(displays: &[DisplayDescriptor], index: usize) -> Rect {
    if displays.is_empty() {
        return virtual_desktop_bounds(displays);
    }
    let index = if index < displays.len() { index } else { 0 };
    displays[index].bounds
}

/// Bounds for a non-interactive full capture.
///
/// `all` selects the whole virtual desktop and ignores the monitor index;
/// otherwise one display by index with the `display_bounds` fallback
/// rules. Also returns the effective display index for the result record
/// (`None` when capturing everything).
pub fn full_capture_bounds(
    displays: &[DisplayDescriptor],
    all: bool,
    monitor: u32,
) -> (Rect, Option<u32>) {
    if all {
        return (virtual_desktop_bounds(displays), None);
    }

    let effective = if displays.is_empty() || (monitor as usize) < displays.len() {
        monitor
    } else {
        0
    };
    (display_bounds(displays, monitor as usize), Some(effective))
}
