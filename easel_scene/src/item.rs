// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawable items.

use core::fmt;

use kurbo::{Point, Rect};
use peniko::Color;

/// One drawable primitive within a [`Scene`](crate::Scene).
#[derive(Clone, Debug)]
pub enum Item {
    /// A (possibly sprite-sliced) image.
    Image(ImageItem),
    /// A filled axis-aligned rectangle.
    Rectangle(RectangleItem),
    /// A filled closed polygon.
    Polygon(PolygonItem),
    /// A single line of text in the renderer's fixed style.
    Text(TextItem),
}

impl Item {
    /// The wire tag of this item.
    pub fn tag(&self) -> ItemTag {
        match self {
            Self::Image(_) => ItemTag::Image,
            Self::Rectangle(_) => ItemTag::Rectangle,
            Self::Polygon(_) => ItemTag::Polygon,
            Self::Text(_) => ItemTag::Text,
        }
    }
}

/// Names of the item variants as they appear on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemTag {
    /// `"image"`
    Image,
    /// `"rectangle"`
    Rectangle,
    /// `"polygon"`
    Polygon,
    /// `"text"`
    Text,
}

impl ItemTag {
    /// Look up a tag by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "image" => Some(Self::Image),
            "rectangle" => Some(Self::Rectangle),
            "polygon" => Some(Self::Polygon),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    /// The wire name of this tag.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Rectangle => "rectangle",
            Self::Polygon => "polygon",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ItemTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source sub-rectangle of a sprite sheet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Left edge in image pixels.
    pub x: f64,
    /// Top edge in image pixels.
    pub y: f64,
    /// Width in image pixels.
    pub width: f64,
    /// Height in image pixels.
    pub height: f64,
}

impl Sprite {
    /// The source rectangle in image space.
    pub fn to_rect(self) -> Rect {
        Rect::from_origin_size((self.x, self.y), (self.width, self.height))
    }
}

/// An image drawn into a destination rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageItem {
    /// Image URL; also the image cache key.
    pub url: String,
    /// Destination left edge.
    pub x: f64,
    /// Destination top edge.
    pub y: f64,
    /// Destination width.
    pub width: f64,
    /// Destination height.
    pub height: f64,
    /// When present, only this region of the source image is drawn.
    pub sprite: Option<Sprite>,
}

impl ImageItem {
    /// The destination rectangle on the surface.
    pub fn dest_rect(&self) -> Rect {
        Rect::from_origin_size((self.x, self.y), (self.width, self.height))
    }
}

/// A filled rectangle.
#[derive(Clone, Debug)]
pub struct RectangleItem {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Fill color.
    pub color: Color,
}

impl RectangleItem {
    /// The rectangle on the surface.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size((self.x, self.y), (self.width, self.height))
    }
}

/// A filled polygon.
///
/// The first point starts the path, the rest are joined with straight lines,
/// and the path is closed before filling.
#[derive(Clone, Debug)]
pub struct PolygonItem {
    /// Vertices in order.
    pub path: Vec<Point>,
    /// Fill color.
    pub color: Color,
}

/// A line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextItem {
    /// The string to draw.
    pub text: String,
    /// Left edge of the baseline.
    pub x: f64,
    /// Baseline position.
    pub y: f64,
}

impl TextItem {
    /// The text anchor point.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<ImageItem> for Item {
    fn from(item: ImageItem) -> Self {
        Self::Image(item)
    }
}

impl From<RectangleItem> for Item {
    fn from(item: RectangleItem) -> Self {
        Self::Rectangle(item)
    }
}

impl From<PolygonItem> for Item {
    fn from(item: PolygonItem) -> Self {
        Self::Polygon(item)
    }
}

impl From<TextItem> for Item {
    fn from(item: TextItem) -> Self {
        Self::Text(item)
    }
}
