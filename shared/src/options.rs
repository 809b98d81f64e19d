use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pen::BRUSH_SIZES;

pub const DEFAULT_WIDTH: u32 = 500;
pub const DEFAULT_HEIGHT: u32 = 300;
pub const SPRAY_INTERVAL_MS: u32 = 25;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid widget options: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid widget options: {0}")]
    Invalid(&'static str),
}

/// Per-widget settings, read from the mount element's `data-paintpad`
/// attribute as JSON. Missing fields take their defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetOptions {
    pub width: u32,
    pub height: u32,
    pub brush_sizes: Vec<u32>,
    pub spray_interval_ms: u32,
    /// Tool selected at start; the first registered tool when unset.
    pub default_tool: Option<String>,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            brush_sizes: BRUSH_SIZES.to_vec(),
            spray_interval_ms: SPRAY_INTERVAL_MS,
            default_tool: None,
        }
    }
}

impl WidgetOptions {
    pub fn parse(raw: Option<&str>) -> Result<Self, OptionsError> {
        let options = match raw.map(str::trim) {
            None | Some("") => Self::default(),
            Some(text) => {
                // Arrays would otherwise fill the fields by position.
                let value = serde_json::from_str::<serde_json::Value>(text)?;
                if !value.is_object() {
                    return Err(OptionsError::Invalid("options must be a JSON object"));
                }
                serde_json::from_value::<Self>(value)?
            }
        };
        options.validate()?;
        Ok(options)
    }

    /// Like [`parse`](Self::parse) but falls back to defaults, logging why.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        Self::parse(raw).unwrap_or_else(|error| {
            log::warn!("{error}; using defaults");
            Self::default()
        })
    }

    fn validate(&self) -> Result<(), OptionsError> {
        if self.width == 0 || self.height == 0 {
            return Err(OptionsError::Invalid("canvas size must be at least 1x1"));
        }
        if self.brush_sizes.is_empty() || self.brush_sizes.contains(&0) {
            return Err(OptionsError::Invalid("brush sizes must be non-empty and positive"));
        }
        if self.spray_interval_ms == 0 {
            return Err(OptionsError::Invalid("spray interval must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_or_blank_means_defaults() {
        assert_eq!(WidgetOptions::parse(None).unwrap(), WidgetOptions::default());
        assert_eq!(WidgetOptions::parse(Some("  ")).unwrap(), WidgetOptions::default());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let options =
            WidgetOptions::parse(Some(r#"{"width": 800, "defaultTool": "Spray"}"#)).unwrap();
        assert_eq!(options.width, 800);
        assert_eq!(options.height, DEFAULT_HEIGHT);
        assert_eq!(options.brush_sizes, BRUSH_SIZES.to_vec());
        assert_eq!(options.default_tool.as_deref(), Some("Spray"));
    }

    #[test]
    fn rejects_nonsense() {
        assert!(matches!(
            WidgetOptions::parse(Some("{width: 1")),
            Err(OptionsError::Parse(_))
        ));
        assert!(matches!(
            WidgetOptions::parse(Some(r#"{"height": 0}"#)),
            Err(OptionsError::Invalid(_))
        ));
        assert!(matches!(
            WidgetOptions::parse(Some(r#"{"brushSizes": []}"#)),
            Err(OptionsError::Invalid(_))
        ));
        assert!(matches!(
            WidgetOptions::parse(Some(r#"{"sprayIntervalMs": 0}"#)),
            Err(OptionsError::Invalid(_))
        ));
    }

    #[test]
    fn only_objects_are_accepted() {
        for raw in ["[1, 2]", "[]", "42", r#""wide""#, "null"] {
            assert!(
                matches!(WidgetOptions::parse(Some(raw)), Err(OptionsError::Invalid(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn bad_options_fall_back() {
        let options = WidgetOptions::parse_or_default(Some("[1, 2]"));
        assert_eq!(options, WidgetOptions::default());
    }
}
