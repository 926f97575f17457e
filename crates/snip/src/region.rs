//! Interactive region capture path

use capture_gdi::{copy_screen_rect, png::write_png, CaptureReport, Rect};
use overlay::{OverlayResult, RegionSelection};
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::info;

/// Run the selection overlay and rasterize the chosen region.
///
/// Everything after the overlay starts is folded into the returned report;
/// an `Err` means the overlay never ran.
pub fn capture(prompt: &str, out: &Path) -> OverlayResult<CaptureReport> {
    Ok(match overlay::select_region(prompt)? {
        RegionSelection::Cancelled => {
            info!("selection cancelled");
            CaptureReport::region_cancelled()
        }
        RegionSelection::TooSmall => CaptureReport::region_error("Selection too small."),
        RegionSelection::Selected { absolute, .. } => {
            // The overlay window is destroyed at this point; wait out one
            // compositor frame so the blt cannot see its chrome.
            thread::sleep(Duration::from_millis(50));

            match rasterize(absolute, out) {
                Ok(()) => {
                    info!(rect = ?absolute, path = %out.display(), "region captured");
                    CaptureReport::region_ok(out, absolute)
                }
                Err(e) => CaptureReport::region_error(e.to_string()),
            }
        }
    })
}

fn rasterize(rect: Rect, out: &Path) -> capture_gdi::CaptureResult<()> {
    let image = copy_screen_rect(rect)?;
    write_png(&image, out)
}
