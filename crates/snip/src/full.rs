//! Non-interactive full capture path

use capture_gdi::{
    copy_screen_rect, full_capture_bounds, png::write_png, CaptureReport, CaptureResult,
    DisplayProvider, Win32Displays,
};
use std::path::Path;
use tracing::info;

/// Capture the whole virtual desktop (`all`) or one display by index.
pub fn capture(out: &Path, all: bool, monitor: u32) -> CaptureResult<CaptureReport> {
    let displays = Win32Displays.displays();
    let (bounds, monitor_index) = full_capture_bounds(&displays, all, monitor);

    let image = copy_screen_rect(bounds)?;
    write_png(&image, out)?;

    info!(rect = ?bounds, path = %out.display(), all, "full capture written");
    Ok(CaptureReport::full_ok(out, bounds, all, monitor_index))
}
