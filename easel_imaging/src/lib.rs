// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Imaging: a tiny drawing IR, the [`Surface`] trait, and the scene renderer.
//!
//! This crate sits between the declarative [`Scene`] model and concrete drawing
//! surfaces (a browser canvas, a CPU pixmap, a recorder used in tests).
//!
//! - [`StateOp`] mutates surface state (size, fill color, font, smoothing).
//! - [`DrawOp`] produces pixels using the current state.
//! - [`Surface`] accepts both; each backend maps them onto its own API.
//! - [`render_scene`] turns a [`Scene`] plus its resolved images
//!   ([`ImageTable`]) into a sequence of ops.
//!
//! Surfaces own no scene knowledge, and the renderer owns no surface state:
//! everything a frame needs is re-issued on every call.
//!
//! ```rust
//! use easel_imaging::{DrawOp, ImageTable, RenderOptions, StateOp, Surface, render_scene};
//! use easel_scene::{Color, Scene, Size};
//!
//! #[derive(Default)]
//! struct Count(usize);
//!
//! impl Surface for Count {
//!     type Image = ();
//!     fn state(&mut self, _op: StateOp) {}
//!     fn draw(&mut self, _op: DrawOp<()>) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut surface = Count::default();
//! let scene = Scene::new(Size::new(8, 8), Color::BLACK);
//! render_scene(&scene, &mut surface, &ImageTable::new(), &RenderOptions::default()).unwrap();
//! // Only the background fill was drawn.
//! assert_eq!(surface.0, 1);
//! ```

mod render;
mod table;

pub use render::{RenderError, RenderOptions, TextStyle, polygon_path, render_scene};
pub use table::ImageTable;

pub use easel_scene::{Color, Point, Rect, Scene, Size};
pub use kurbo::BezPath;

/// Operations that change surface state without drawing.
#[derive(Clone, Debug)]
pub enum StateOp {
    /// Resize the surface. Backends whose context state resets on resize (the
    /// browser canvas does) lose every other state setting at this point.
    Resize(Size),
    /// Enable or disable interpolation when images are scaled.
    ///
    /// When disabled, scaled images use nearest-neighbor sampling so pixel art
    /// stays crisp.
    SetImageSmoothing(bool),
    /// Set the color used by subsequent fills.
    SetFill(Color),
    /// Set the CSS font used by subsequent text draws.
    SetFont(String),
}

/// Operations that produce pixels.
#[derive(Clone, Debug)]
pub enum DrawOp<I> {
    /// Fill an axis-aligned rectangle with the current fill color.
    FillRect(Rect),
    /// Fill a path with the current fill color using the non-zero rule.
    FillPath(BezPath),
    /// Draw an image scaled into `dst`.
    DrawImage {
        /// Image handle.
        image: I,
        /// Destination rectangle on the surface.
        dst: Rect,
        /// Source rectangle in image pixels; the whole image when `None`.
        src: Option<Rect>,
    },
    /// Fill a string with the current font and fill color.
    FillText {
        /// The string to draw.
        text: String,
        /// Left end of the baseline.
        origin: Point,
    },
}

/// A drawing surface.
///
/// `Image` is whatever handle the backend draws images from. It is cloned
/// out of the [`ImageTable`] for every image draw, so it should be cheap to
/// clone (a reference-counted pointer or a JS object handle).
pub trait Surface {
    /// Backend image handle.
    type Image: Clone;

    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp<Self::Image>);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    type Image = S::Image;

    fn state(&mut self, op: StateOp) {
        (**self).state(op);
    }

    fn draw(&mut self, op: DrawOp<Self::Image>) {
        (**self).draw(op);
    }
}
