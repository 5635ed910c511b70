// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Port: routing between an application's message ports and Easel.
//!
//! The application talks to Easel over two one-way channels:
//!
//! - **outgoing** (application to Easel): `{ "action": "RENDER", "payload": <scene> }`.
//!   [`PortBridge::dispatch`] decodes these and hands back a [`RenderTask`]
//!   for the platform to run. Other actions are ignored.
//! - **incoming** (Easel to application): `{ "x": .., "y": .. }` joystick vectors.
//!   [`InputForwarder`] turns touch positions into [`StickVector`]s and passes
//!   each one to a sink, typically the port's `send`.
//!
//! The bridge is platform-neutral: it never spawns anything itself. The
//! browser entry point runs tasks with `spawn_local`; tests drive them with
//! `pollster`.
//!
//! ## Render tasks
//!
//! A render task prefetches every image the scene uses through the shared
//! [`ImageCache`](easel_image_cache::ImageCache), then draws the whole scene in
//! one go. Scenes with no images complete on their first poll.
//!
//! When [`BridgeOptions::cancel_superseded`] is set (the default), starting a
//! render aborts the previous one if it is still waiting for images. The
//! aborted task resolves to [`RenderOutcome::Superseded`] and never touches
//! the surface.
//!
//! ```rust
//! use easel_imaging_ref::RecordingSurface;
//! use easel_image_cache::{ImageCache, ImageLoadError, ImageLoader};
//! use easel_port::{BridgeOptions, PortBridge, RenderOutcome};
//! use futures::future::{FutureExt, LocalBoxFuture, ready};
//!
//! struct NoImages;
//! impl ImageLoader for NoImages {
//!     type Image = ();
//!     fn load(&self, url: &str) -> LocalBoxFuture<'static, Result<(), ImageLoadError>> {
//!         ready(Err(ImageLoadError::new(url, "no images here"))).boxed_local()
//!     }
//! }
//!
//! let bridge = PortBridge::new(
//!     RecordingSurface::new(),
//!     ImageCache::new(NoImages),
//!     BridgeOptions::default(),
//! );
//! let task = bridge
//!     .dispatch(r#"{ "action": "RENDER",
//!                    "payload": { "size": { "width": 2, "height": 2 },
//!                                 "background": "black", "items": [] } }"#)
//!     .unwrap()
//!     .expect("RENDER produces a task");
//! assert_eq!(pollster::block_on(task).unwrap(), RenderOutcome::Drawn);
//! ```

mod bridge;
mod input;
mod message;

pub use bridge::{BridgeOptions, PortBridge, RenderOutcome, RenderTask, report};
pub use input::{InputForwarder, StickVector};
pub use message::{BridgeError, InboundMessage, RENDER_ACTION};
