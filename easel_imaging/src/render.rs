// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene renderer.

use core::fmt;

use easel_scene::{Color, Item, Point, Scene};
use kurbo::BezPath;

use crate::{DrawOp, ImageTable, StateOp, Surface};

/// Fixed style used for every text item.
#[derive(Clone, Debug)]
pub struct TextStyle {
    /// CSS font shorthand, e.g. `"16px monospace"`.
    pub font: String,
    /// Text fill color.
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: "16px monospace".into(),
            color: Color::WHITE,
        }
    }
}

/// Renderer settings that do not come from the scene.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Interpolate scaled images. Off by default so sprite art stays crisp.
    pub image_smoothing: bool,
    /// Style for text items.
    pub text: TextStyle,
}

/// Error that aborts a single render before anything is drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// An image item references a URL that is not in the image table.
    MissingImage {
        /// The unresolved URL.
        url: String,
    },
    /// A polygon item has no points.
    EmptyPath {
        /// Position of the item in the scene.
        index: usize,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingImage { url } => write!(f, "image {url:?} was not resolved"),
            Self::EmptyPath { index } => write!(f, "polygon item at index {index} has no points"),
        }
    }
}

impl core::error::Error for RenderError {}

/// Build the closed path for a polygon.
///
/// Returns `None` for an empty point list. A single point yields a degenerate
/// path that fills nothing.
pub fn polygon_path(points: &[Point]) -> Option<BezPath> {
    let (first, rest) = points.split_first()?;
    let mut path = BezPath::new();
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    path.close_path();
    Some(path)
}

fn validate<I>(scene: &Scene, images: &ImageTable<I>) -> Result<(), RenderError> {
    for (index, item) in scene.items.iter().enumerate() {
        match item {
            Item::Image(image) if !images.contains(&image.url) => {
                return Err(RenderError::MissingImage {
                    url: image.url.clone(),
                });
            }
            Item::Polygon(polygon) if polygon.path.is_empty() => {
                return Err(RenderError::EmptyPath { index });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Draw `scene` onto `surface`.
///
/// The surface is resized to the scene size, filled with the background, and
/// then every item is drawn in order. The scene is checked first: if an image
/// is missing from `images` or a polygon has no points, an error is returned
/// and the surface is left untouched.
pub fn render_scene<S: Surface + ?Sized>(
    scene: &Scene,
    surface: &mut S,
    images: &ImageTable<S::Image>,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    validate(scene, images)?;

    surface.state(StateOp::Resize(scene.size));
    // After the resize: a canvas resets its context state when its size changes.
    surface.state(StateOp::SetImageSmoothing(options.image_smoothing));
    surface.state(StateOp::SetFill(scene.background));
    surface.draw(DrawOp::FillRect(scene.size.to_rect()));

    let mut font_set = false;
    for (index, item) in scene.items.iter().enumerate() {
        match item {
            Item::Rectangle(rect) => {
                surface.state(StateOp::SetFill(rect.color));
                surface.draw(DrawOp::FillRect(rect.rect()));
            }
            Item::Polygon(polygon) => {
                let path = polygon_path(&polygon.path).ok_or(RenderError::EmptyPath { index })?;
                surface.state(StateOp::SetFill(polygon.color));
                surface.draw(DrawOp::FillPath(path));
            }
            Item::Image(image) => {
                let handle = images
                    .get(&image.url)
                    .ok_or_else(|| RenderError::MissingImage {
                        url: image.url.clone(),
                    })?;
                surface.draw(DrawOp::DrawImage {
                    image: handle.clone(),
                    dst: image.dest_rect(),
                    src: image.sprite.map(|s| s.to_rect()),
                });
            }
            Item::Text(text) => {
                if !font_set {
                    surface.state(StateOp::SetFont(options.text.font.clone()));
                    font_set = true;
                }
                surface.state(StateOp::SetFill(options.text.color));
                surface.draw(DrawOp::FillText {
                    text: text.text.clone(),
                    origin: text.origin(),
                });
            }
        }
    }
    Ok(())
}
