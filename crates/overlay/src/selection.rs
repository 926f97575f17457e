//! Selection rectangle math

use capture_gdi::{Point, Rect};

/// Minimum selection dimension in overlay-local pixels; `< 5` rejects.
pub const MIN_SELECTION_SIZE: u32 = 5;

/// Normalized rectangle between two drag points.
///
/// min/max on both axes, so any of the four drag directions yields the
/// same non-negative rectangle.
pub fn selection_rect(anchor: Point, current: Point) -> Rect {
    let x = anchor.x.min(current.x);
    let y = anchor.y.min(current.y);
    let width = (anchor.x - current.x).unsigned_abs();
    let height = (anchor.y - current.y).unsigned_abs();

    Rect::new(x, y, width, height)
}

/// Both dimensions must clear the threshold independently.
pub fn meets_minimum(rect: &Rect) -> bool {
    rect.width >= MIN_SELECTION_SIZE && rect.height >= MIN_SELECTION_SIZE
}

/// Clamp a pointer position to the overlay surface.
///
/// Pointer capture keeps events flowing when a drag leaves the surface;
/// the far edge is inclusive so a drag to the edge selects the last
/// row/column.
pub fn clamp_point(p: Point, surface: Rect) -> Point {
    Point::new(
        p.x.clamp(0, surface.width as i32),
        p.y.clamp(0, surface.height as i32),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_four_drag_directions_normalize_identically() {
        let a = Point::new(10, 20);
        let b = Point::new(110, 220);
        let expected = Rect::new(10, 20, 100, 200);

        assert_eq!(selection_rect(a, b), expected);
        assert_eq!(selection_rect(b, a), expected);
        assert_eq!(selection_rect(Point::new(110, 20), Point::new(10, 220)), expected);
        assert_eq!(selection_rect(Point::new(10, 220), Point::new(110, 20)), expected);
    }

    #[test]
    fn zero_motion_gives_empty_rect() {
        let p = Point::new(42, 42);
        let rect = selection_rect(p, p);
        assert_eq!((rect.width, rect.height), (0, 0));
    }

    #[test]
    fn threshold_is_strict_and_per_axis() {
        assert!(!meets_minimum(&Rect::new(0, 0, 4, 100)));
        assert!(!meets_minimum(&Rect::new(0, 0, 100, 4)));
        assert!(!meets_minimum(&Rect::new(0, 0, 4, 4)));
        assert!(meets_minimum(&Rect::new(0, 0, 5, 5)));
    }

    #[test]
    fn clamps_past_every_edge() {
        let surface = Rect::new(0, 0, 1920, 1080);
        assert_eq!(clamp_point(Point::new(-30, -5), surface), Point::new(0, 0));
        assert_eq!(clamp_point(Point::new(4000, 2000), surface), Point::new(1920, 1080));
        assert_eq!(clamp_point(Point::new(800, 600), surface), Point::new(800, 600));
    }
}
