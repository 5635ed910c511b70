// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual joystick: normalize touch displacement into a direction vector.
//!
//! ## Usage
//!
//! 1) Call [`StickState::start`] with the first touch point. This anchors the stick.
//! 2) On each move, call [`StickState::update`]. It returns the displacement from the
//!    anchor scaled so the larger axis has magnitude 1, keeping its sign.
//! 3) On touch end or cancel, call [`StickState::end`]. It returns the zero vector once
//!    and releases the anchor.
//!
//! A move that lands exactly on the anchor has no direction and produces nothing.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use easel_event_state::stick::StickState;
//!
//! let mut stick = StickState::default();
//!
//! stick.start(Point::new(100.0, 100.0));
//! assert!(stick.is_tracking());
//!
//! // Mostly left, a little down.
//! let v = stick.update(Point::new(80.0, 105.0)).unwrap();
//! assert_eq!(v, Vec2::new(-1.0, 0.25));
//!
//! assert_eq!(stick.end(), Some(Vec2::ZERO));
//! assert!(!stick.is_tracking());
//! ```

use kurbo::{Point, Vec2};

/// Scale `delta` so its dominant axis has magnitude 1.
///
/// Returns `None` for a zero or non-finite displacement.
pub fn normalize(delta: Vec2) -> Option<Vec2> {
    let m = delta.x.abs().max(delta.y.abs());
    if m == 0.0 || !m.is_finite() {
        return None;
    }
    Some(Vec2::new(delta.x / m, delta.y / m))
}

/// Tracks one touch gesture.
#[derive(Debug, Clone, Default, Copy)]
pub struct StickState {
    /// Where the active touch started, if tracking.
    pub anchor: Option<Point>,
}

impl StickState {
    /// Anchor the stick at `pos`.
    ///
    /// Ignored while a touch is already being tracked: only the first finger
    /// of a gesture steers.
    pub fn start(&mut self, pos: Point) {
        if self.anchor.is_none() {
            self.anchor = Some(pos);
        }
    }

    /// Normalized displacement from the anchor to `pos`.
    ///
    /// `None` when idle or when `pos` is the anchor.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        normalize(pos - self.anchor?)
    }

    /// Release the anchor.
    ///
    /// Returns the zero vector if a touch was being tracked, `None` otherwise.
    pub fn end(&mut self) -> Option<Vec2> {
        self.anchor.take().map(|_| Vec2::ZERO)
    }

    /// Returns `true` while a touch is anchored.
    pub fn is_tracking(&self) -> bool {
        self.anchor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stick_is_idle() {
        let stick = StickState::default();
        assert!(!stick.is_tracking());
        assert!(stick.anchor.is_none());
    }

    #[test]
    fn dominant_axis_reaches_one() {
        let mut stick = StickState::default();
        stick.start(Point::new(0.0, 0.0));

        assert_eq!(stick.update(Point::new(10.0, 5.0)), Some(Vec2::new(1.0, 0.5)));
        assert_eq!(stick.update(Point::new(2.0, 8.0)), Some(Vec2::new(0.25, 1.0)));
    }

    #[test]
    fn signs_are_kept() {
        let mut stick = StickState::default();
        stick.start(Point::new(50.0, 50.0));

        assert_eq!(
            stick.update(Point::new(40.0, 45.0)),
            Some(Vec2::new(-1.0, -0.5))
        );
        assert_eq!(stick.update(Point::new(50.0, 70.0)), Some(Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn diagonal_is_unit_on_both_axes() {
        let mut stick = StickState::default();
        stick.start(Point::new(0.0, 0.0));

        assert_eq!(stick.update(Point::new(-3.0, 3.0)), Some(Vec2::new(-1.0, 1.0)));
    }

    #[test]
    fn move_onto_anchor_emits_nothing() {
        let mut stick = StickState::default();
        stick.start(Point::new(0.0, 0.0));

        assert_eq!(stick.update(Point::new(0.0, 0.0)), None);
        assert!(stick.is_tracking());
    }

    #[test]
    fn update_when_idle_emits_nothing() {
        let mut stick = StickState::default();
        assert_eq!(stick.update(Point::new(15.0, 25.0)), None);
    }

    #[test]
    fn end_emits_zero_once() {
        let mut stick = StickState::default();
        stick.start(Point::new(0.0, 0.0));
        stick.update(Point::new(3.0, 1.0));

        assert_eq!(stick.end(), Some(Vec2::ZERO));
        assert!(!stick.is_tracking());
        assert_eq!(stick.end(), None);
    }

    #[test]
    fn restart_after_end_reanchors() {
        let mut stick = StickState::default();
        stick.start(Point::new(0.0, 0.0));
        stick.end();

        stick.start(Point::new(100.0, 100.0));
        assert_eq!(stick.anchor, Some(Point::new(100.0, 100.0)));
        assert_eq!(
            stick.update(Point::new(110.0, 105.0)),
            Some(Vec2::new(1.0, 0.5))
        );
    }

    #[test]
    fn second_start_while_tracking_is_ignored() {
        let mut stick = StickState::default();
        stick.start(Point::new(0.0, 0.0));
        stick.start(Point::new(40.0, 40.0));

        assert_eq!(stick.anchor, Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn non_finite_displacement_emits_nothing() {
        assert_eq!(normalize(Vec2::new(f64::INFINITY, 1.0)), None);
        assert_eq!(normalize(Vec2::new(f64::NAN, f64::NAN)), None);
    }

    #[test]
    fn output_stays_in_unit_square() {
        let mut stick = StickState::default();
        stick.start(Point::new(1.5, 2.7));

        for pos in [
            Point::new(1000000.0, 2.0),
            Point::new(-7.25, 3.1),
            Point::new(1.5, -900.0),
        ] {
            let v = stick.update(pos).unwrap();
            assert!((-1.0..=1.0).contains(&v.x), "x out of range: {v:?}");
            assert!((-1.0..=1.0).contains(&v.y), "y out of range: {v:?}");
        }
    }
}
