//! Screen capture primitives for SnipServe
//!
//! Display geometry, GDI framebuffer rasterization and PNG persistence,
//! plus the JSON result record shared with the MCP server.

pub mod geometry;
pub mod png;
pub mod report;

#[cfg(windows)]
pub mod displays;
#[cfg(windows)]
pub mod screen;

pub use geometry::{
    display_bounds, full_capture_bounds, virtual_desktop_bounds, DisplayDescriptor,
    DisplayProvider,
};
pub use report::{CaptureMode, CaptureReport};

#[cfg(windows)]
pub use displays::Win32Displays;
#[cfg(windows)]
pub use screen::copy_screen_rect;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("Screen copy failed: {0}")]
    ScreenCopy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type CaptureResult<T> = Result<T, CaptureError>;

/// Rectangle in physical pixels, absolute desktop coordinates unless noted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Smallest rectangle containing both rectangles
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, (right - x) as u32, (bottom - y) as u32)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Point in physical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_spans_both_rects() {
        let a = Rect::new(0, 0, 1920, 1080);
        let b = Rect::new(-1920, 0, 1920, 1200);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(-1920, 0, 3840, 1200));
    }

    #[test]
    fn contains_is_exclusive_on_far_edges() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains(10, 10));
        assert!(r.contains(14, 14));
        assert!(!r.contains(15, 10));
        assert!(!r.contains(10, 15));
    }
}
