//! Annotation types placed on a chart
//!
//! Every annotation keeps the item it was created from verbatim, so the
//! tooltip can expose fields the library itself does not understand.

use std::fmt;

use serde_json::Value;

use super::geometry::Coords;
use super::options::{ImageOptions, LabelOptions};

/// Annotation kind, fixed when the annotation is created
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Simple,
    Image,
    Label,
}

impl AnnotationKind {
    pub fn name(self) -> &'static str {
        match self {
            AnnotationKind::Simple => "simple",
            AnnotationKind::Image => "image",
            AnnotationKind::Label => "label",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Marker annotation drawn as a small circle
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleAnnotation {
    /// Item configuration as given
    pub item: Value,
    /// Coordinates resolved by the last draw
    pub coords: Coords,
}

/// Picture centered on the annotation point
#[derive(Clone, Debug, PartialEq)]
pub struct ImageAnnotation {
    /// Item configuration as given
    pub item: Value,
    /// Shared image options merged with the item's own
    pub options: ImageOptions,
    /// Coordinates resolved by the last draw
    pub coords: Coords,
}

/// Text anchored at the annotation point
#[derive(Clone, Debug, PartialEq)]
pub struct LabelAnnotation {
    /// Item configuration as given
    pub item: Value,
    /// Shared label options merged with the item's own
    pub options: LabelOptions,
    /// Coordinates resolved by the last draw
    pub coords: Coords,
}

/// Unified annotation type, in configuration order
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    Simple(SimpleAnnotation),
    Image(ImageAnnotation),
    Label(LabelAnnotation),
}

impl Annotation {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Annotation::Simple(_) => AnnotationKind::Simple,
            Annotation::Image(_) => AnnotationKind::Image,
            Annotation::Label(_) => AnnotationKind::Label,
        }
    }

    /// The item configuration this annotation was created from
    pub fn item(&self) -> &Value {
        match self {
            Annotation::Simple(a) => &a.item,
            Annotation::Image(a) => &a.item,
            Annotation::Label(a) => &a.item,
        }
    }

    /// Numeric argument (`x`) of the item, if any
    pub fn argument(&self) -> Option<f64> {
        self.item().get("x").and_then(Value::as_f64)
    }

    /// Numeric value (`y`) of the item, if any
    pub fn value(&self) -> Option<f64> {
        self.item().get("y").and_then(Value::as_f64)
    }

    pub fn coords(&self) -> Coords {
        match self {
            Annotation::Simple(a) => a.coords,
            Annotation::Image(a) => a.coords,
            Annotation::Label(a) => a.coords,
        }
    }

    pub(crate) fn set_coords(&mut self, coords: Coords) {
        match self {
            Annotation::Simple(a) => a.coords = coords,
            Annotation::Image(a) => a.coords = coords,
            Annotation::Label(a) => a.coords = coords,
        }
    }

    /// Coordinates resolved by the most recent draw
    pub fn tooltip_params(&self) -> Coords {
        self.coords()
    }

    /// The original item, including fields the annotation does not use
    pub fn tooltip_format_object(&self) -> &Value {
        self.item()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names() {
        assert_eq!(AnnotationKind::Simple.to_string(), "simple");
        assert_eq!(AnnotationKind::Image.to_string(), "image");
        assert_eq!(AnnotationKind::Label.to_string(), "label");
    }

    #[test]
    fn test_argument_and_value_are_numeric_only() {
        let annotation = Annotation::Simple(SimpleAnnotation {
            item: json!({ "x": 4, "y": "high" }),
            coords: Coords::default(),
        });
        assert_eq!(annotation.argument(), Some(4.0));
        assert_eq!(annotation.value(), None);
    }

    #[test]
    fn test_tooltip_params_before_draw_are_unresolved() {
        let annotation = Annotation::Simple(SimpleAnnotation {
            item: json!({ "x": 0, "y": 0 }),
            coords: Coords::default(),
        });
        assert_eq!(annotation.tooltip_params(), Coords::unresolved());
    }
}
