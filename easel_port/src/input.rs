// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use easel_event_state::stick::StickState;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A joystick direction as sent to the application's incoming port.
///
/// Each component is in `[-1, 1]`; the dominant axis is exactly `±1` unless
/// the stick was released, in which case both are `0`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StickVector {
    /// Horizontal component, positive to the right.
    pub x: f64,
    /// Vertical component, positive downward.
    pub y: f64,
}

impl StickVector {
    /// The released stick.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl From<Vec2> for StickVector {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Feeds touch positions through a [`StickState`] and sends each resulting
/// vector to `sink`.
pub struct InputForwarder<F> {
    stick: StickState,
    sink: F,
}

impl<F: FnMut(StickVector)> InputForwarder<F> {
    /// Forward vectors to `sink`.
    pub fn new(sink: F) -> Self {
        Self {
            stick: StickState::default(),
            sink,
        }
    }

    /// A finger touched down at `pos`.
    ///
    /// Only anchors the stick; nothing is sent until it moves.
    pub fn touch_start(&mut self, pos: Point) {
        self.stick.start(pos);
    }

    /// The tracked finger moved to `pos`.
    pub fn touch_move(&mut self, pos: Point) {
        if let Some(v) = self.stick.update(pos) {
            (self.sink)(v.into());
        }
    }

    /// The tracked finger lifted. Sends the zero vector if a touch was active.
    pub fn touch_end(&mut self) {
        if let Some(v) = self.stick.end() {
            (self.sink)(v.into());
        }
    }

    /// The platform cancelled the touch. Same as [`touch_end`](Self::touch_end).
    pub fn touch_cancel(&mut self) {
        self.touch_end();
    }

    /// Whether a touch is being tracked.
    pub fn is_tracking(&self) -> bool {
        self.stick.is_tracking()
    }
}

impl<F> core::fmt::Debug for InputForwarder<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InputForwarder")
            .field("stick", &self.stick)
            .finish_non_exhaustive()
    }
}
