//! Drag-session state machine
//!
//! `Idle -> Dragging -> {Completed, Cancelled, TooSmall}`. Each transition
//! takes the previous phase by value and returns the next one, so there is
//! no shared mutable drag state outside the event dispatcher.

use crate::selection::{clamp_point, meets_minimum, selection_rect};
use capture_gdi::{Point, Rect};

/// Non-terminal overlay phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging { anchor: Point, current: Point },
}

impl Phase {
    /// Live selection rectangle, empty while idle
    pub fn selection(&self) -> Option<Rect> {
        match self {
            Phase::Idle => None,
            Phase::Dragging { anchor, current } => Some(selection_rect(*anchor, *current)),
        }
    }
}

/// Pointer and key events fed by the host event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    /// Primary button pressed at an overlay-local point
    ButtonDown(Point),
    PointerMove(Point),
    /// Primary button released
    ButtonUp(Point),
    Escape,
}

/// Terminal outcome; each run produces exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Selection met the minimum size (overlay-local rectangle)
    Completed(Rect),
    TooSmall,
    Cancelled,
}

/// Result of one transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub phase: Phase,
    pub outcome: Option<Outcome>,
    pub redraw: bool,
}

impl Step {
    fn stay(phase: Phase) -> Self {
        Self { phase, outcome: None, redraw: false }
    }

    fn redraw(phase: Phase) -> Self {
        Self { phase, outcome: None, redraw: true }
    }

    fn finish(outcome: Outcome) -> Self {
        Self { phase: Phase::Idle, outcome: Some(outcome), redraw: false }
    }
}

/// Advance the machine by one event.
///
/// `surface` is the overlay rectangle in its own coordinate space; pointer
/// positions are clamped to it before use.
pub fn step(phase: Phase, event: OverlayEvent, surface: Rect) -> Step {
    match (phase, event) {
        (_, OverlayEvent::Escape) => Step::finish(Outcome::Cancelled),

        (_, OverlayEvent::ButtonDown(p)) => {
            let p = clamp_point(p, surface);
            Step::redraw(Phase::Dragging { anchor: p, current: p })
        }

        (Phase::Idle, OverlayEvent::PointerMove(_)) => Step::stay(Phase::Idle),
        (Phase::Idle, OverlayEvent::ButtonUp(_)) => Step::stay(Phase::Idle),

        (Phase::Dragging { anchor, .. }, OverlayEvent::PointerMove(p)) => {
            let current = clamp_point(p, surface);
            Step::redraw(Phase::Dragging { anchor, current })
        }

        (Phase::Dragging { anchor, .. }, OverlayEvent::ButtonUp(p)) => {
            let rect = selection_rect(anchor, clamp_point(p, surface));
            if meets_minimum(&rect) {
                Step::finish(Outcome::Completed(rect))
            } else {
                Step::finish(Outcome::TooSmall)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: Rect = Rect { x: 0, y: 0, width: 1920, height: 1080 };

    fn drive(events: &[OverlayEvent]) -> (Phase, Option<Outcome>) {
        let mut phase = Phase::Idle;
        for event in events {
            let s = step(phase, *event, SURFACE);
            if let Some(outcome) = s.outcome {
                return (s.phase, Some(outcome));
            }
            phase = s.phase;
        }
        (phase, None)
    }

    #[test]
    fn full_drag_completes_with_normalized_rect() {
        let (_, outcome) = drive(&[
            OverlayEvent::ButtonDown(Point::new(300, 400)),
            OverlayEvent::PointerMove(Point::new(200, 150)),
            OverlayEvent::ButtonUp(Point::new(100, 100)),
        ]);
        assert_eq!(outcome, Some(Outcome::Completed(Rect::new(100, 100, 200, 300))));
    }

    #[test]
    fn every_drag_direction_yields_non_negative_dimensions() {
        let anchor = Point::new(500, 500);
        for end in [
            Point::new(400, 400),
            Point::new(600, 400),
            Point::new(400, 600),
            Point::new(600, 600),
        ] {
            let (_, outcome) = drive(&[
                OverlayEvent::ButtonDown(anchor),
                OverlayEvent::PointerMove(end),
                OverlayEvent::ButtonUp(end),
            ]);
            match outcome {
                Some(Outcome::Completed(rect)) => {
                    assert_eq!((rect.width, rect.height), (100, 100));
                }
                other => panic!("unexpected outcome {other:?}"),
            }
        }
    }

    #[test]
    fn undersized_drag_is_too_small() {
        let (_, outcome) = drive(&[
            OverlayEvent::ButtonDown(Point::new(10, 10)),
            OverlayEvent::ButtonUp(Point::new(14, 300)),
        ]);
        assert_eq!(outcome, Some(Outcome::TooSmall));
    }

    #[test]
    fn five_pixel_selection_is_accepted() {
        let (_, outcome) = drive(&[
            OverlayEvent::ButtonDown(Point::new(10, 10)),
            OverlayEvent::ButtonUp(Point::new(15, 15)),
        ]);
        assert_eq!(outcome, Some(Outcome::Completed(Rect::new(10, 10, 5, 5))));
    }

    #[test]
    fn escape_cancels_before_any_drag() {
        let (_, outcome) = drive(&[OverlayEvent::Escape]);
        assert_eq!(outcome, Some(Outcome::Cancelled));
    }

    #[test]
    fn escape_aborts_an_active_drag() {
        let (_, outcome) = drive(&[
            OverlayEvent::ButtonDown(Point::new(10, 10)),
            OverlayEvent::PointerMove(Point::new(600, 600)),
            OverlayEvent::Escape,
        ]);
        assert_eq!(outcome, Some(Outcome::Cancelled));
    }

    #[test]
    fn release_past_the_surface_edge_is_clamped() {
        let (_, outcome) = drive(&[
            OverlayEvent::ButtonDown(Point::new(1800, 1000)),
            OverlayEvent::PointerMove(Point::new(2500, 1400)),
            OverlayEvent::ButtonUp(Point::new(2500, 1400)),
        ]);
        assert_eq!(outcome, Some(Outcome::Completed(Rect::new(1800, 1000, 120, 80))));
    }

    #[test]
    fn stray_button_up_while_idle_is_ignored() {
        let (phase, outcome) = drive(&[OverlayEvent::ButtonUp(Point::new(50, 50))]);
        assert_eq!(phase, Phase::Idle);
        assert_eq!(outcome, None);
    }

    #[test]
    fn moves_while_idle_do_not_start_a_selection() {
        let (phase, outcome) = drive(&[
            OverlayEvent::PointerMove(Point::new(100, 100)),
            OverlayEvent::PointerMove(Point::new(200, 200)),
        ]);
        assert_eq!(phase, Phase::Idle);
        assert_eq!(outcome, None);
        assert_eq!(phase.selection(), None);
    }

    #[test]
    fn dragging_phase_reports_live_selection() {
        let s = step(Phase::Idle, OverlayEvent::ButtonDown(Point::new(10, 10)), SURFACE);
        assert!(s.redraw);
        let s = step(s.phase, OverlayEvent::PointerMove(Point::new(60, 40)), SURFACE);
        assert!(s.redraw);
        assert_eq!(s.phase.selection(), Some(Rect::new(10, 10, 50, 30)));
    }
}
