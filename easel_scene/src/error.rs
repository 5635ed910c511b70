// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::ItemTag;

/// Error returned when a scene cannot be decoded.
#[derive(Debug)]
pub enum SceneError {
    /// The scene JSON does not have the expected structure.
    Malformed(serde_json::Error),
    /// An item's payload does not match the fields its tag requires.
    MalformedItem {
        /// Position of the item in the scene.
        index: usize,
        /// The item's tag.
        tag: ItemTag,
        /// Underlying decode failure.
        source: serde_json::Error,
    },
    /// An item names a tag the renderer has no drawing operation for.
    UnknownItemTag {
        /// Position of the item in the scene.
        index: usize,
        /// The unrecognized tag.
        tag: String,
    },
    /// An item has an empty `args` array.
    MissingArgs {
        /// Position of the item in the scene.
        index: usize,
        /// The item's tag.
        tag: ItemTag,
    },
    /// A color string could not be parsed as a CSS color.
    InvalidColor(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed scene: {err}"),
            Self::MalformedItem { index, tag, source } => {
                write!(f, "malformed {tag} item at index {index}: {source}")
            }
            Self::UnknownItemTag { index, tag } => {
                write!(f, "item at index {index} has unknown tag {tag:?}")
            }
            Self::MissingArgs { index, tag } => {
                write!(f, "{tag} item at index {index} has no arguments")
            }
            Self::InvalidColor(text) => write!(f, "invalid color {text:?}"),
        }
    }
}

impl core::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Malformed(err) | Self::MalformedItem { source: err, .. } => Some(err),
            Self::UnknownItemTag { .. } | Self::MissingArgs { .. } | Self::InvalidColor(_) => None,
        }
    }
}
