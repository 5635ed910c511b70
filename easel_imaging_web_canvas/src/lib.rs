// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web Canvas (2D) surface for Easel.
//!
//! This crate provides a [`Surface`](easel_imaging::Surface) backed by
//! `web_sys::CanvasRenderingContext2d`, and an
//! [`ImageLoader`](easel_image_cache::ImageLoader) that decodes images through
//! `HTMLImageElement`. Both are only available when targeting `wasm32`; on
//! other targets the crate is empty.
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn make_surface(
//!     document: &web_sys::Document,
//! ) -> Result<easel_imaging_web_canvas::WebCanvasSurface, wasm_bindgen::JsValue> {
//!     easel_imaging_web_canvas::WebCanvasSurface::from_selector(document, "#canvas")
//! }
//! ```
//!
//! Notes:
//! - `Resize` sets the canvas element's `width` and `height`, which clears it
//!   and resets the context state, so the renderer re-applies state afterwards.
//! - Draw failures reported by the browser (for example a broken image) are
//!   logged and skipped; the rest of the scene still draws.

#![no_std]

extern crate alloc;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod loader;

#[cfg(target_arch = "wasm32")]
pub use canvas::WebCanvasSurface;
#[cfg(target_arch = "wasm32")]
pub use loader::HtmlImageLoader;
