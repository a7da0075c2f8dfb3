//! Placement module for SimpleClock
//! Decides where the clock docks and where the help popup opens relative to it

use crate::geometry::{Point, Rect, Size};

/// Position a window of `window` size in the bottom-right corner of `work_area`
pub fn dock_bottom_right(window: Size, work_area: Rect) -> Point {
    Point::new(
        work_area.right() - window.width,
        work_area.bottom() - window.height,
    )
}

/// Find a spot for `subject` next to `anchor` that stays inside `bounds`.
///
/// The four corners of the anchor are tried in order, keeping the subject
/// completely outside the anchor:
///
/// 1. above-left (subject's bottom-right on anchor's top-left)
/// 2. above-right (subject's bottom-left on anchor's top-right)
/// 3. below-left (subject's top-right on anchor's bottom-left)
/// 4. below-right (subject's top-left on anchor's bottom-right)
///
/// The first candidate that fits wins. If none fits, the subject is pinned
/// to the anchor's top-left and pushed back inside `bounds`, overlapping the
/// anchor if it has to. When the subject is larger than `bounds` the lower
/// edge wins and the result can still stick out past the right or bottom.
pub fn place_beside(anchor: Rect, subject: Size, bounds: Rect) -> Point {
    let left_of = anchor.left - subject.width;
    let right_of = anchor.right();
    let above = anchor.top - subject.height;
    let below = anchor.bottom();

    let fits_left = left_of >= bounds.left;
    let fits_right = right_of + subject.width <= bounds.right();
    let fits_above = above >= bounds.top;
    let fits_below = below + subject.height <= bounds.bottom();

    let candidates = [
        (fits_left && fits_above, Point::new(left_of, above)),
        (fits_right && fits_above, Point::new(right_of, above)),
        (fits_left && fits_below, Point::new(left_of, below)),
        (fits_right && fits_below, Point::new(right_of, below)),
    ];

    candidates
        .into_iter()
        .find_map(|(fits, point)| fits.then_some(point))
        .unwrap_or_else(|| {
            Point::new(
                clamp_low_wins(anchor.left, bounds.left, bounds.right() - subject.width),
                clamp_low_wins(anchor.top, bounds.top, bounds.bottom() - subject.height),
            )
        })
}

/// `max(low, min(value, high))`; unlike `f64::clamp` this tolerates `low > high`
fn clamp_low_wins(value: f64, low: f64, high: f64) -> f64 {
    value.min(high).max(low)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn test_dock_bottom_right() {
        let work = Rect::new(0.0, 0.0, 1920.0, 1040.0);
        let pos = dock_bottom_right(Size::new(200.0, 40.0), work);
        assert_eq!(pos, Point::new(1720.0, 1000.0));
    }

    #[test]
    fn test_dock_bottom_right_offset_work_area() {
        // Taskbar on the left, secondary monitor origin
        let work = Rect::new(-1280.0, 40.0, 1280.0, 984.0);
        let pos = dock_bottom_right(Size::new(100.0, 24.0), work);
        assert_eq!(pos, Point::new(-100.0, 1000.0));
    }

    #[test]
    fn test_prefers_above_left() {
        let anchor = Rect::new(100.0, 100.0, 50.0, 50.0);
        let pos = place_beside(anchor, Size::new(40.0, 30.0), screen());
        assert_eq!(pos, Point::new(60.0, 70.0));
    }

    #[test]
    fn test_above_right_when_left_is_blocked() {
        let anchor = Rect::new(10.0, 100.0, 50.0, 50.0);
        let pos = place_beside(anchor, Size::new(40.0, 30.0), screen());
        assert_eq!(pos, Point::new(60.0, 70.0));
    }

    #[test]
    fn test_below_left_when_top_is_blocked() {
        let anchor = Rect::new(100.0, 10.0, 50.0, 50.0);
        let pos = place_beside(anchor, Size::new(40.0, 30.0), screen());
        assert_eq!(pos, Point::new(60.0, 60.0));
    }

    #[test]
    fn test_top_left_corner_falls_to_below_right() {
        // Up-left, up-right and down-left all leave the screen
        let anchor = Rect::new(0.0, 0.0, 50.0, 50.0);
        let pos = place_beside(anchor, Size::new(40.0, 30.0), screen());
        assert_eq!(pos, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_clock_docked_bottom_right_opens_help_above_left() {
        let work = Rect::new(0.0, 0.0, 1920.0, 1040.0);
        let clock = Size::new(180.0, 40.0);
        let home = dock_bottom_right(clock, work);
        let anchor = Rect::new(home.x, home.y, clock.width, clock.height);

        let pos = place_beside(anchor, Size::new(260.0, 140.0), work);
        assert_eq!(pos, Point::new(1480.0, 860.0));
    }

    #[test]
    fn test_exact_fit_is_accepted() {
        // Subject touches the top-left corner of the bounds exactly
        let anchor = Rect::new(40.0, 30.0, 50.0, 50.0);
        let pos = place_beside(anchor, Size::new(40.0, 30.0), screen());
        assert_eq!(pos, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_respects_bounds_origin() {
        let bounds = Rect::new(100.0, 100.0, 700.0, 500.0);
        let anchor = Rect::new(120.0, 400.0, 50.0, 50.0);
        let pos = place_beside(anchor, Size::new(40.0, 30.0), bounds);
        // Left of the anchor would be x=80 which is outside, so above-right
        assert_eq!(pos, Point::new(170.0, 370.0));
    }

    #[test]
    fn test_fallback_overlaps_anchor() {
        // Anchor fills most of the screen so no corner has room
        let anchor = Rect::new(20.0, 20.0, 760.0, 560.0);
        let pos = place_beside(anchor, Size::new(100.0, 100.0), screen());
        assert_eq!(pos, Point::new(20.0, 20.0));
    }

    #[test]
    fn test_fallback_pulls_back_inside_bounds() {
        let anchor = Rect::new(750.0, 20.0, 40.0, 570.0);
        let pos = place_beside(anchor, Size::new(200.0, 100.0), Rect::new(0.0, 0.0, 800.0, 600.0));
        // Left side: 750 - 200 = 550 fits horizontally, but 20 - 100 < 0 above
        // and 590 + 100 > 600 below, so every corner fails
        assert_eq!(pos, Point::new(600.0, 20.0));
    }

    #[test]
    fn test_oversized_subject_is_degenerate_but_defined() {
        let anchor = Rect::new(100.0, 100.0, 50.0, 50.0);
        let subject = Size::new(900.0, 700.0);
        let pos = place_beside(anchor, subject, screen());

        // min(100, 800 - 900) = -100, then max(0, -100) = 0
        assert_eq!(pos, Point::new(0.0, 0.0));
        assert!(pos.x + subject.width > screen().right());
        assert!(pos.y + subject.height > screen().bottom());
    }

    #[test]
    fn test_oversized_subject_with_negative_origin_bounds() {
        let bounds = Rect::new(-200.0, -100.0, 300.0, 200.0);
        let anchor = Rect::new(0.0, 0.0, 10.0, 10.0);
        let pos = place_beside(anchor, Size::new(400.0, 300.0), bounds);
        assert_eq!(pos, Point::new(-200.0, -100.0));
    }

    #[test]
    fn test_is_deterministic() {
        let anchor = Rect::new(300.0, 200.0, 120.0, 40.0);
        let subject = Size::new(250.0, 150.0);
        let first = place_beside(anchor, subject, screen());
        for _ in 0..10 {
            assert_eq!(place_beside(anchor, subject, screen()), first);
        }
    }
}
