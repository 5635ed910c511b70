// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw JSON shapes sent by the application.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    ImageItem, Item, ItemTag, Point, PolygonItem, RectangleItem, Scene, SceneError, Size, Sprite,
    TextItem, parse_css_color,
};

#[derive(Deserialize)]
pub(crate) struct RawScene {
    size: RawSize,
    background: String,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Deserialize)]
struct RawSize {
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct RawItem {
    tag: String,
    #[serde(default)]
    args: Vec<Value>,
}

#[derive(Deserialize)]
struct RawRectangle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: String,
}

#[derive(Deserialize)]
struct RawPolygon {
    path: Vec<[f64; 2]>,
    color: String,
}

#[derive(Deserialize)]
struct RawImage {
    url: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    sprite: Option<RawSprite>,
}

#[derive(Deserialize)]
struct RawSprite {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct RawText {
    text: String,
    x: f64,
    y: f64,
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Canvas dimensions truncate toward zero and saturate, which is what `as` does."
)]
fn pixels(v: f64) -> u32 {
    v as u32
}

impl RawScene {
    pub(crate) fn into_scene(self) -> Result<Scene, SceneError> {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| item.into_item(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Scene {
            size: Size::new(pixels(self.size.width), pixels(self.size.height)),
            background: parse_css_color(&self.background)?,
            items,
        })
    }
}

impl RawItem {
    fn into_item(self, index: usize) -> Result<Item, SceneError> {
        let Some(tag) = ItemTag::from_name(&self.tag) else {
            return Err(SceneError::UnknownItemTag {
                index,
                tag: self.tag,
            });
        };
        // Only the first record is meaningful; the application always sends one.
        let Some(record) = self.args.into_iter().next() else {
            return Err(SceneError::MissingArgs { index, tag });
        };
        let malformed = |source| SceneError::MalformedItem { index, tag, source };

        let item = match tag {
            ItemTag::Rectangle => {
                let raw: RawRectangle = serde_json::from_value(record).map_err(malformed)?;
                Item::Rectangle(RectangleItem {
                    x: raw.x,
                    y: raw.y,
                    width: raw.width,
                    height: raw.height,
                    color: parse_css_color(&raw.color)?,
                })
            }
            ItemTag::Polygon => {
                let raw: RawPolygon = serde_json::from_value(record).map_err(malformed)?;
                Item::Polygon(PolygonItem {
                    path: raw.path.into_iter().map(|[x, y]| Point::new(x, y)).collect(),
                    color: parse_css_color(&raw.color)?,
                })
            }
            ItemTag::Image => {
                let raw: RawImage = serde_json::from_value(record).map_err(malformed)?;
                Item::Image(ImageItem {
                    url: raw.url,
                    x: raw.x,
                    y: raw.y,
                    width: raw.width,
                    height: raw.height,
                    sprite: raw.sprite.map(|s| Sprite {
                        x: s.x,
                        y: s.y,
                        width: s.width,
                        height: s.height,
                    }),
                })
            }
            ItemTag::Text => {
                let raw: RawText = serde_json::from_value(record).map_err(malformed)?;
                Item::Text(TextItem {
                    text: raw.text,
                    x: raw.x,
                    y: raw.y,
                })
            }
        };
        Ok(item)
    }
}
