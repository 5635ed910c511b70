// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use easel_imaging::{RenderOptions, TextStyle};
use easel_port::BridgeOptions;
use easel_scene::{SceneError, parse_css_color};
use log::LevelFilter;
use serde::Deserialize;

/// Settings passed from JavaScript to `attach`.
///
/// Field names are camelCase on the JavaScript side (`canvasSelector`, ...).
/// Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct WebConfig {
    /// CSS selector of the canvas to draw on. Default `"#canvas"`.
    pub canvas_selector: String,
    /// Port the application sends render requests on. Default `"outgoing"`.
    pub outgoing_port: String,
    /// Port joystick vectors are sent to. Default `"incoming"`.
    pub incoming_port: String,
    /// Interpolate scaled images. Default `false`.
    pub image_smoothing: bool,
    /// CSS font for text items. Default `"16px monospace"`.
    pub text_font: String,
    /// CSS color for text items. Default `"white"`.
    pub text_color: String,
    /// Abort renders superseded while waiting for images. Default `true`.
    pub cancel_superseded: bool,
    /// Console log level: `off`, `error`, `warn`, `info`, `debug` or `trace`.
    /// Default `"warn"`.
    pub log_level: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        let text = TextStyle::default();
        Self {
            canvas_selector: "#canvas".into(),
            outgoing_port: "outgoing".into(),
            incoming_port: "incoming".into(),
            image_smoothing: false,
            text_font: text.font,
            text_color: "white".into(),
            cancel_superseded: true,
            log_level: "warn".into(),
        }
    }
}

impl WebConfig {
    /// Decode from JSON text. `null` yields the defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Option<Self> = serde_json::from_str(text).map_err(ConfigError::Malformed)?;
        Ok(config.unwrap_or_default())
    }

    /// Bridge settings described by this config.
    pub fn bridge_options(&self) -> Result<BridgeOptions, ConfigError> {
        let color = parse_css_color(&self.text_color).map_err(ConfigError::TextColor)?;
        Ok(BridgeOptions {
            render: RenderOptions {
                image_smoothing: self.image_smoothing,
                text: TextStyle {
                    font: self.text_font.clone(),
                    color,
                },
            },
            cancel_superseded: self.cancel_superseded,
        })
    }

    /// The configured log level.
    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}

/// Error returned for an unusable `attach` config.
#[derive(Debug)]
pub enum ConfigError {
    /// The config is not an object of known fields.
    Malformed(serde_json::Error),
    /// `textColor` is not a CSS color.
    TextColor(SceneError),
    /// `logLevel` is not a level name.
    LogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "invalid config: {err}"),
            Self::TextColor(err) => write!(f, "invalid textColor: {err}"),
            Self::LogLevel(level) => write!(f, "invalid logLevel {level:?}"),
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::TextColor(err) => Some(err),
            Self::LogLevel(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_scene::Color;

    #[test]
    fn null_and_empty_object_give_defaults() {
        assert_eq!(WebConfig::from_json("null").unwrap(), WebConfig::default());
        assert_eq!(WebConfig::from_json("{}").unwrap(), WebConfig::default());
    }

    #[test]
    fn defaults_match_renderer_defaults() {
        let options = WebConfig::default().bridge_options().unwrap();
        let expected = BridgeOptions::default();

        assert_eq!(options.cancel_superseded, expected.cancel_superseded);
        assert_eq!(options.render.image_smoothing, expected.render.image_smoothing);
        assert_eq!(options.render.text.font, expected.render.text.font);
        assert_eq!(
            options.render.text.color.to_rgba8(),
            expected.render.text.color.to_rgba8()
        );
        assert_eq!(WebConfig::default().log_level().unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn camel_case_fields_override_defaults() {
        let config = WebConfig::from_json(
            r##"{ "canvasSelector": "#game", "outgoingPort": "draw",
                  "imageSmoothing": true, "textColor": "#ff0000",
                  "cancelSuperseded": false, "logLevel": "debug" }"##,
        )
        .unwrap();

        assert_eq!(config.canvas_selector, "#game");
        assert_eq!(config.outgoing_port, "draw");
        assert_eq!(config.incoming_port, "incoming");
        assert_eq!(config.log_level().unwrap(), LevelFilter::Debug);

        let options = config.bridge_options().unwrap();
        assert!(options.render.image_smoothing);
        assert!(!options.cancel_superseded);
        assert_eq!(
            options.render.text.color.to_rgba8(),
            Color::from_rgb8(255, 0, 0).to_rgba8()
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = WebConfig::from_json(r##"{ "canvas": "#c" }"##).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)), "got {err:?}");
        assert!(err.to_string().contains("unknown field `canvas`"), "{err}");
    }

    #[test]
    fn bad_values_are_reported() {
        let config = WebConfig {
            text_color: "not-a-color".into(),
            log_level: "loud".into(),
            ..WebConfig::default()
        };

        assert!(matches!(
            config.bridge_options(),
            Err(ConfigError::TextColor(_))
        ));
        let err = config.log_level().unwrap_err();
        assert_eq!(err.to_string(), "invalid logLevel \"loud\"");
    }
}
