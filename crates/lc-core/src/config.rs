//! Canvas configuration.
//!
//! Every field has a default matching the lesson page, so a host can pass
//! a partial JSON object (or nothing) and override only what it needs.

use crate::model::{Color, Stroke};
use serde::{Deserialize, Serialize};

/// Configuration for a canvas controller and its browser bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Initial stroke color. Default: **black**.
    pub default_color: Color,

    /// Initial line width. Default: **5**.
    pub default_line_width: f64,

    /// Narrowest width the width slider allows. Default: **3**.
    pub min_line_width: f64,

    /// Widest width the width slider allows. Default: **20**.
    pub max_line_width: f64,

    /// CSS font for text elements. Default: **24px sans-serif**.
    pub font: String,

    /// Height of a text element's box. Default: **24**.
    pub text_line_height: f64,

    /// Colors offered as one-click palette buttons.
    pub palette: Vec<Color>,

    /// Storage key for the serialized element list.
    pub elements_key: String,

    /// Storage key for the underlay image source.
    pub image_key: String,

    /// Cap on history entries. `None` keeps every entry.
    pub history_limit: Option<usize>,

    /// File name offered for PNG export.
    pub export_file_name: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            default_color: Color::BLACK,
            default_line_width: 5.0,
            min_line_width: 3.0,
            max_line_width: 20.0,
            font: "24px sans-serif".to_string(),
            text_line_height: 24.0,
            palette: ["white", "purple", "pink", "red", "black"]
                .iter()
                .filter_map(|name| Color::parse(name))
                .collect(),
            elements_key: "canvasElements".to_string(),
            image_key: "canvasImage".to_string(),
            history_limit: None,
            export_file_name: "image.png".to_string(),
        }
    }
}

impl CanvasConfig {
    /// Parse a (possibly partial) JSON configuration object.
    ///
    /// # Errors
    /// Returns the serde error message if the JSON is malformed or a
    /// field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: CanvasConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
        if config.min_line_width > config.max_line_width {
            return Err(format!(
                "minLineWidth ({}) exceeds maxLineWidth ({})",
                config.min_line_width, config.max_line_width
            ));
        }
        Ok(config)
    }

    /// Clamp a requested width into the configured slider range.
    pub fn clamp_line_width(&self, width: f64) -> f64 {
        width.clamp(self.min_line_width, self.max_line_width)
    }

    /// Stroke new elements start with.
    pub fn default_stroke(&self) -> Stroke {
        Stroke::new(
            self.default_color,
            self.clamp_line_width(self.default_line_width),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_lesson_page() {
        let config = CanvasConfig::default();
        assert_eq!(config.default_line_width, 5.0);
        assert_eq!(config.elements_key, "canvasElements");
        assert_eq!(config.image_key, "canvasImage");
        assert_eq!(config.palette.len(), 5);
        assert_eq!(config.default_stroke(), Stroke::new(Color::BLACK, 5.0));
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config =
            CanvasConfig::from_json(r##"{"defaultColor":"#FF0000","historyLimit":50}"##).unwrap();
        assert_eq!(config.default_color.to_hex(), "#FF0000");
        assert_eq!(config.history_limit, Some(50));
        assert_eq!(config.font, "24px sans-serif");
    }

    #[test]
    fn rejects_inverted_width_range() {
        let err = CanvasConfig::from_json(r#"{"minLineWidth":30}"#).unwrap_err();
        assert!(err.contains("minLineWidth"), "unexpected error: {err}");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(CanvasConfig::from_json("{").is_err());
        assert!(CanvasConfig::from_json(r#"{"defaultColor":"nope"}"#).is_err());
    }

    #[test]
    fn clamps_width() {
        let config = CanvasConfig::default();
        assert_eq!(config.clamp_line_width(1.0), 3.0);
        assert_eq!(config.clamp_line_width(12.0), 12.0);
        assert_eq!(config.clamp_line_width(99.0), 20.0);
    }
}
