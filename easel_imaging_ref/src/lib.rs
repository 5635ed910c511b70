// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Imaging Reference Surface.
//!
//! This crate provides [`RecordingSurface`], a small, stateful implementation
//! of [`Surface`] for **op recording and state tracing**.
//!
//! It does not rasterize. Tests use it to assert on the ops a render emits
//! and on the surface state at the time each op was applied.

use easel_imaging::{Color, DrawOp, Size, StateOp, Surface};

/// Snapshot of the current surface state.
#[derive(Clone, Debug)]
pub struct StateSnapshot {
    /// Current surface size.
    pub size: Size,
    /// Current fill color.
    pub fill: Color,
    /// Current font, if one has been set since the last resize.
    pub font: Option<String>,
    /// Whether scaled images are interpolated.
    pub image_smoothing: bool,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            size: Size::default(),
            fill: Color::BLACK,
            font: None,
            image_smoothing: true,
        }
    }
}

/// Event recorded by the surface.
#[derive(Clone, Debug)]
pub enum Event<I> {
    /// State operation and the resulting state snapshot.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// Snapshot after applying the state operation.
        state: StateSnapshot,
    },
    /// Draw operation and the state snapshot used for drawing.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp<I>,
        /// Snapshot at the time of drawing.
        state: StateSnapshot,
    },
}

/// Surface that records every op it receives.
///
/// Resizing resets fill, font, and smoothing to their defaults, mirroring how
/// a browser canvas discards its context state when its size changes.
#[derive(Debug)]
pub struct RecordingSurface<I = ()> {
    events: Vec<Event<I>>,
    state: StateSnapshot,
}

impl<I> Default for RecordingSurface<I> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            state: StateSnapshot::default(),
        }
    }
}

impl<I> RecordingSurface<I> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event<I>] {
        &self.events
    }

    /// Iterate over the draw ops only, with the state each was drawn under.
    pub fn draws(&self) -> impl Iterator<Item = (&DrawOp<I>, &StateSnapshot)> {
        self.events.iter().filter_map(|event| match event {
            Event::Draw { op, state } => Some((op, state)),
            Event::State { .. } => None,
        })
    }

    /// Current surface state.
    pub fn current_state(&self) -> &StateSnapshot {
        &self.state
    }

    /// Clears all recorded events but keeps the current state.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl<I: Clone> Surface for RecordingSurface<I> {
    type Image = I;

    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::Resize(size) => {
                self.state = StateSnapshot {
                    size: *size,
                    ..StateSnapshot::default()
                };
            }
            StateOp::SetImageSmoothing(on) => self.state.image_smoothing = *on,
            StateOp::SetFill(color) => self.state.fill = *color,
            StateOp::SetFont(font) => self.state.font = Some(font.clone()),
        }
        self.events.push(Event::State {
            op,
            state: self.state.clone(),
        });
    }

    fn draw(&mut self, op: DrawOp<I>) {
        self.events.push(Event::Draw {
            op,
            state: self.state.clone(),
        });
    }
}
