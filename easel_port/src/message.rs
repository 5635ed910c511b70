// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use easel_image_cache::ImageLoadError;
use easel_imaging::RenderError;
use easel_scene::{Scene, SceneError};
use serde::Deserialize;
use serde_json::Value;

/// The only action the bridge acts on.
pub const RENDER_ACTION: &str = "RENDER";

/// A decoded message from the application's outgoing port.
#[derive(Clone, Debug)]
pub enum InboundMessage {
    /// Draw this scene.
    Render(Scene),
    /// Any other action; carries the action name, or the action's JSON text
    /// when it is not a string.
    Unrecognized(String),
}

#[derive(Deserialize)]
struct RawMessage {
    action: Value,
    #[serde(default)]
    payload: Value,
}

impl InboundMessage {
    /// Decode a message from JSON text.
    ///
    /// Only the payload of a `RENDER` message is decoded; payloads of other
    /// actions are never inspected.
    pub fn from_json(text: &str) -> Result<Self, BridgeError> {
        let raw: RawMessage = serde_json::from_str(text).map_err(BridgeError::Message)?;
        match raw.action {
            Value::String(action) if action == RENDER_ACTION => {
                Ok(Self::Render(Scene::from_value(raw.payload)?))
            }
            Value::String(action) => Ok(Self::Unrecognized(action)),
            other => Ok(Self::Unrecognized(other.to_string())),
        }
    }
}

/// Anything that can make one render request fail.
#[derive(Debug)]
pub enum BridgeError {
    /// The port message is not `{ action, payload }`.
    Message(serde_json::Error),
    /// The scene payload could not be decoded.
    Scene(SceneError),
    /// An image the scene needs could not be loaded.
    Image(ImageLoadError),
    /// The renderer rejected the scene.
    Render(RenderError),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(err) => write!(f, "malformed port message: {err}"),
            Self::Scene(err) => err.fmt(f),
            Self::Image(err) => err.fmt(f),
            Self::Render(err) => err.fmt(f),
        }
    }
}

impl core::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Message(err) => Some(err),
            Self::Scene(err) => Some(err),
            Self::Image(err) => Some(err),
            Self::Render(err) => Some(err),
        }
    }
}

impl From<SceneError> for BridgeError {
    fn from(err: SceneError) -> Self {
        Self::Scene(err)
    }
}

impl From<ImageLoadError> for BridgeError {
    fn from(err: ImageLoadError) -> Self {
        Self::Image(err)
    }
}

impl From<RenderError> for BridgeError {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}
