//! Option groups carried by image and label annotations
//!
//! Every field is optional. Shared groups (`imageOptions`, `labelOptions`)
//! and per-item groups are merged field by field, the per-item value winning.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Style properties applied to a drawn element, keyed by property name
pub type Style = BTreeMap<&'static str, StyleValue>;

/// A single style property value
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

/// Deserialize a field, treating a value of the wrong type as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            log::warn!("Ignoring annotation option {}: {}", value, err);
            Ok(None)
        }
    }
}

/// Parse an option group from raw JSON, degrading to an empty group
pub(crate) fn parse_group<T: DeserializeOwned + Default>(value: &Value) -> T {
    match serde_json::from_value(value.clone()) {
        Ok(group) => group,
        Err(err) => {
            log::warn!("Ignoring malformed annotation options {}: {}", value, err);
            T::default()
        }
    }
}

/// Image annotation options
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageOptions {
    /// Image source (a URL or a local path)
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub width: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub height: Option<f64>,
    /// Placement hint of the picture inside its box (`center`, `full`, ...)
    #[serde(deserialize_with = "lenient")]
    pub location: Option<String>,
}

impl ImageOptions {
    /// Overlay `overrides` on top of `self`
    pub fn merge(&self, overrides: &ImageOptions) -> ImageOptions {
        ImageOptions {
            url: overrides.url.clone().or_else(|| self.url.clone()),
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            location: overrides.location.clone().or_else(|| self.location.clone()),
        }
    }
}

/// Font options of a label
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Font {
    #[serde(deserialize_with = "lenient")]
    pub size: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub color: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub family: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub weight: Option<u16>,
    #[serde(deserialize_with = "lenient")]
    pub opacity: Option<f64>,
}

impl Font {
    /// Overlay `overrides` on top of `self`, key by key
    pub fn merge(&self, overrides: &Font) -> Font {
        Font {
            size: overrides.size.or(self.size),
            color: overrides.color.clone().or_else(|| self.color.clone()),
            family: overrides.family.clone().or_else(|| self.family.clone()),
            weight: overrides.weight.or(self.weight),
            opacity: overrides.opacity.or(self.opacity),
        }
    }

    /// Style properties for the set fields only
    pub fn style(&self) -> Style {
        let mut style = Style::new();
        if let Some(size) = self.size {
            style.insert("font-size", size.into());
        }
        if let Some(color) = &self.color {
            style.insert("fill", color.as_str().into());
        }
        if let Some(family) = &self.family {
            style.insert("font-family", family.as_str().into());
        }
        if let Some(weight) = self.weight {
            style.insert("font-weight", f64::from(weight).into());
        }
        if let Some(opacity) = self.opacity {
            style.insert("opacity", opacity.into());
        }
        style
    }
}

/// Label annotation options
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelOptions {
    #[serde(deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub font: Option<Font>,
}

impl LabelOptions {
    /// Overlay `overrides` on top of `self`; fonts merge key by key
    pub fn merge(&self, overrides: &LabelOptions) -> LabelOptions {
        let font = match (&self.font, &overrides.font) {
            (Some(base), Some(over)) => Some(base.merge(over)),
            (base, over) => over.clone().or_else(|| base.clone()),
        };
        LabelOptions {
            text: overrides.text.clone().or_else(|| self.text.clone()),
            font,
        }
    }

    /// Style derived from the font, empty when no font is set
    pub fn style(&self) -> Style {
        self.font.as_ref().map(Font::style).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_merge_prefers_item_values() {
        let defaults: ImageOptions = parse_group(&json!({ "height": 10, "width": 40 }));
        let item: ImageOptions = parse_group(&json!({ "url": "some_url", "width": 10 }));

        let merged = defaults.merge(&item);
        assert_eq!(merged.url.as_deref(), Some("some_url"));
        assert_eq!(merged.width, Some(10.0));
        assert_eq!(merged.height, Some(10.0));
        assert_eq!(merged.location, None);
    }

    #[test]
    fn test_font_merge_keeps_keys_from_both_sides() {
        let defaults: LabelOptions = parse_group(&json!({ "font": { "color": "red", "size": 12 } }));
        let item: LabelOptions = parse_group(&json!({ "text": "t", "font": { "size": 20 } }));

        let merged = defaults.merge(&item);
        let font = merged.font.unwrap();
        assert_eq!(font.size, Some(20.0));
        assert_eq!(font.color.as_deref(), Some("red"));
        assert_eq!(merged.text.as_deref(), Some("t"));
    }

    #[test]
    fn test_label_merge_without_item_font() {
        let defaults: LabelOptions = parse_group(&json!({ "font": { "color": "red" } }));
        let merged = defaults.merge(&LabelOptions::default());
        assert_eq!(merged.font.and_then(|f| f.color).as_deref(), Some("red"));
    }

    #[test]
    fn test_font_style_only_contains_set_fields() {
        let font = Font {
            size: Some(20.0),
            ..Default::default()
        };
        let style = font.style();
        assert_eq!(style.len(), 1);
        assert_eq!(style.get("font-size"), Some(&StyleValue::Number(20.0)));
    }

    #[test]
    fn test_font_style_maps_all_properties() {
        let font: Font = parse_group(&json!({
            "size": 14,
            "color": "#333",
            "family": "Segoe UI",
            "weight": 600,
            "opacity": 0.5
        }));
        let style = font.style();
        assert_eq!(style.get("fill"), Some(&StyleValue::from("#333")));
        assert_eq!(style.get("font-family"), Some(&StyleValue::from("Segoe UI")));
        assert_eq!(style.get("font-weight"), Some(&StyleValue::Number(600.0)));
        assert_eq!(style.get("opacity"), Some(&StyleValue::Number(0.5)));
    }

    #[test]
    fn test_wrong_typed_field_is_absent() {
        let options: ImageOptions = parse_group(&json!({ "url": "a.png", "width": "wide" }));
        assert_eq!(options.url.as_deref(), Some("a.png"));
        assert_eq!(options.width, None);
    }

    #[test]
    fn test_non_object_group_is_empty() {
        let options: LabelOptions = parse_group(&json!("not an object"));
        assert_eq!(options, LabelOptions::default());
    }

    #[test]
    fn test_style_value_display() {
        assert_eq!(StyleValue::Number(20.0).to_string(), "20");
        assert_eq!(StyleValue::from("red").to_string(), "red");
    }
}
