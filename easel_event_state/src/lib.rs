// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Event State: touch input state machines.
//!
//! - [`stick`]: turn a single-finger touch gesture into a virtual joystick
//!   vector whose dominant axis has magnitude 1.
//!
//! State machines here accept raw positions and produce values; they do not
//! know about DOM events or any particular windowing system.
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use easel_event_state::stick::StickState;
//!
//! let mut stick = StickState::default();
//! stick.start(Point::new(0.0, 0.0));
//! assert_eq!(stick.update(Point::new(10.0, 5.0)), Some(Vec2::new(1.0, 0.5)));
//! assert_eq!(stick.end(), Some(Vec2::ZERO));
//! ```
//!
//! This crate is `no_std` compatible.

#![no_std]

pub mod stick;
