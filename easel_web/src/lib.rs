// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Web: the browser entry point.
//!
//! Built for `wasm32`, this crate exports one function, `attach(ports, config)`,
//! which:
//!
//! 1. routes panics to `console.error` and installs a console logger at
//!    `config.logLevel`,
//! 2. finds the canvas matching `config.canvasSelector`,
//! 3. subscribes to `ports[config.outgoingPort]` and renders every `RENDER`
//!    message it receives,
//! 4. listens for touch events on the window and sends joystick vectors to
//!    `ports[config.incomingPort]`.
//!
//! ```js
//! import init, { attach } from "./easel_web.js";
//! await init();
//! attach(app.ports, { canvasSelector: "#game", logLevel: "debug" });
//! ```
//!
//! Every config field is optional; see [`WebConfig`] for the defaults.
//! On other targets only [`WebConfig`] is available.

mod config;
#[cfg(target_arch = "wasm32")]
mod entry;
#[cfg(target_arch = "wasm32")]
mod logger;

pub use config::{ConfigError, WebConfig};
#[cfg(target_arch = "wasm32")]
pub use entry::attach;
