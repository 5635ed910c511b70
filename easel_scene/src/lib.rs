// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Scene: the declarative frame description an application sends to Easel.
//!
//! A [`Scene`] is one frame: a surface [`Size`], a background [`Color`], and an
//! ordered list of [`Item`]s. Items are painted strictly in order, so later
//! items cover earlier ones. There is no z-order field.
//!
//! Scenes arrive as JSON produced by the application. Each item is encoded as a
//! tagged record with its payload in an `args` array:
//!
//! ```rust
//! use easel_scene::{Item, Scene};
//!
//! let scene = Scene::from_json(r##"{
//!     "size": { "width": 10, "height": 10 },
//!     "background": "#000",
//!     "items": [
//!         { "tag": "rectangle",
//!           "args": [{ "x": 0, "y": 0, "width": 10, "height": 10, "color": "#fff" }] }
//!     ]
//! }"##).unwrap();
//!
//! assert_eq!(scene.size.width, 10);
//! assert!(matches!(scene.items[0], Item::Rectangle(_)));
//! ```
//!
//! Decoding is strict about item tags: an unknown tag is reported as
//! [`SceneError::UnknownItemTag`] rather than being skipped, since it means the
//! application and the renderer disagree about the drawing vocabulary.

mod error;
mod item;
mod wire;

pub use error::SceneError;
pub use item::{ImageItem, Item, ItemTag, PolygonItem, RectangleItem, Sprite, TextItem};
pub use kurbo::{Point, Rect};
pub use peniko::Color;

use peniko::color::{Srgb, parse_color};

/// Surface size in device pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The rectangle covering the whole surface.
    pub fn to_rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// One frame to draw.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Size the surface is resized to before drawing.
    pub size: Size,
    /// Color the whole surface is filled with before any item is drawn.
    pub background: Color,
    /// Items in paint order.
    pub items: Vec<Item>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(size: Size, background: Color) -> Self {
        Self {
            size,
            background,
            items: Vec::new(),
        }
    }

    /// Append an item, returning the scene.
    #[must_use]
    pub fn with_item(mut self, item: impl Into<Item>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Decode a scene from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        let raw: wire::RawScene = serde_json::from_str(text).map_err(SceneError::Malformed)?;
        raw.into_scene()
    }

    /// Decode a scene from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SceneError> {
        let raw: wire::RawScene = serde_json::from_value(value).map_err(SceneError::Malformed)?;
        raw.into_scene()
    }

    /// Distinct image URLs referenced by this scene, in first-use order.
    pub fn image_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = Vec::new();
        for item in &self.items {
            if let Item::Image(image) = item
                && !urls.contains(&image.url.as_str())
            {
                urls.push(&image.url);
            }
        }
        urls
    }
}

/// Parse a CSS color string (`"#fff"`, `"rgb(0 128 255)"`, `"white"`, ...).
pub fn parse_css_color(text: &str) -> Result<Color, SceneError> {
    parse_color(text.trim())
        .map(|color| color.to_alpha_color::<Srgb>())
        .map_err(|_| SceneError::InvalidColor(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::color::Rgba8;

    const RGBA_WHITE: Rgba8 = Rgba8 {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    #[test]
    fn decodes_every_item_kind() {
        let scene = Scene::from_json(
            r##"{
                "size": { "width": 320, "height": 240 },
                "background": "#336699",
                "items": [
                    { "tag": "rectangle", "args": [{ "x": 1, "y": 2, "width": 3, "height": 4, "color": "red" }] },
                    { "tag": "polygon", "args": [{ "path": [[0, 0], [10, 0], [5, 8]], "color": "#fff" }] },
                    { "tag": "image", "args": [{ "url": "hero.png", "x": 4, "y": 4, "width": 16, "height": 16,
                                                 "sprite": { "x": 16, "y": 0, "width": 16, "height": 16 } }] },
                    { "tag": "image", "args": [{ "url": "tile.png", "x": 0, "y": 0, "width": 8, "height": 8, "sprite": null }] },
                    { "tag": "text", "args": [{ "text": "score 10", "x": 2, "y": 20 }] }
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(scene.size, Size::new(320, 240));
        assert_eq!(
            scene.background.to_rgba8(),
            Rgba8 {
                r: 0x33,
                g: 0x66,
                b: 0x99,
                a: 255
            }
        );
        assert_eq!(scene.items.len(), 5);

        let Item::Rectangle(rect) = &scene.items[0] else {
            panic!("expected rectangle, got {:?}", scene.items[0]);
        };
        assert_eq!(rect.rect(), Rect::new(1.0, 2.0, 4.0, 6.0));

        let Item::Polygon(polygon) = &scene.items[1] else {
            panic!("expected polygon, got {:?}", scene.items[1]);
        };
        assert_eq!(polygon.path.len(), 3);
        assert_eq!(polygon.path[2], Point::new(5.0, 8.0));
        assert_eq!(polygon.color.to_rgba8(), RGBA_WHITE);

        let Item::Image(hero) = &scene.items[2] else {
            panic!("expected image, got {:?}", scene.items[2]);
        };
        assert_eq!(
            hero.sprite.map(Sprite::to_rect),
            Some(Rect::new(16.0, 0.0, 32.0, 16.0))
        );

        let Item::Image(tile) = &scene.items[3] else {
            panic!("expected image, got {:?}", scene.items[3]);
        };
        assert!(tile.sprite.is_none());

        let Item::Text(text) = &scene.items[4] else {
            panic!("expected text, got {:?}", scene.items[4]);
        };
        assert_eq!(text.text, "score 10");
        assert_eq!(text.origin(), Point::new(2.0, 20.0));
    }

    #[test]
    fn empty_items_may_be_omitted() {
        let scene =
            Scene::from_json(r#"{ "size": { "width": 4, "height": 2 }, "background": "black" }"#)
                .unwrap();
        assert!(scene.items.is_empty());
        assert_eq!(scene.size, Size::new(4, 2));
    }

    #[test]
    fn fractional_sizes_truncate_like_canvas() {
        let scene = Scene::from_json(
            r#"{ "size": { "width": 99.7, "height": -3 }, "background": "black", "items": [] }"#,
        )
        .unwrap();
        assert_eq!(scene.size, Size::new(99, 0));
    }

    #[test]
    fn unknown_tag_is_reported_with_index() {
        let err = Scene::from_json(
            r#"{ "size": { "width": 1, "height": 1 }, "background": "black",
                 "items": [
                    { "tag": "rectangle", "args": [{ "x": 0, "y": 0, "width": 1, "height": 1, "color": "red" }] },
                    { "tag": "circle", "args": [{ "r": 3 }] }
                 ] }"#,
        )
        .unwrap_err();

        match err {
            SceneError::UnknownItemTag { index, tag } => {
                assert_eq!(index, 1);
                assert_eq!(tag, "circle");
            }
            other => panic!("expected UnknownItemTag, got {other:?}"),
        }
    }

    #[test]
    fn missing_args_is_reported() {
        let err = Scene::from_json(
            r#"{ "size": { "width": 1, "height": 1 }, "background": "black",
                 "items": [{ "tag": "text", "args": [] }] }"#,
        )
        .unwrap_err();
        assert!(
            matches!(err, SceneError::MissingArgs { index: 0, tag: ItemTag::Text }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn malformed_item_names_the_tag() {
        let err = Scene::from_json(
            r#"{ "size": { "width": 1, "height": 1 }, "background": "black",
                 "items": [{ "tag": "image", "args": [{ "x": 0 }] }] }"#,
        )
        .unwrap_err();
        assert!(
            matches!(
                err,
                SceneError::MalformedItem {
                    index: 0,
                    tag: ItemTag::Image,
                    ..
                }
            ),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn invalid_colors_are_rejected() {
        let err = Scene::from_json(
            r#"{ "size": { "width": 1, "height": 1 }, "background": "not-a-color", "items": [] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::InvalidColor(ref c) if c == "not-a-color"));
    }

    #[test]
    fn short_hex_colors_parse() {
        assert_eq!(parse_css_color("#fff").unwrap().to_rgba8(), RGBA_WHITE);
        assert_eq!(parse_css_color(" white ").unwrap().to_rgba8(), RGBA_WHITE);
    }

    #[test]
    fn image_urls_are_distinct_and_ordered() {
        let image = |url: &str| ImageItem {
            url: url.into(),
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            sprite: None,
        };
        let scene = Scene::new(Size::new(1, 1), Color::BLACK)
            .with_item(image("b.png"))
            .with_item(RectangleItem {
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 1.0,
                color: Color::WHITE,
            })
            .with_item(image("a.png"))
            .with_item(image("b.png"));

        assert_eq!(scene.image_urls(), ["b.png", "a.png"]);
    }
}
