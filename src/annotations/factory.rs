//! Annotation creation from chart configuration
//!
//! Each item is classified once: a `label` object makes a label annotation,
//! otherwise an `image` object makes an image annotation, otherwise the item
//! is a simple marker.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{
    Annotation, Coords, ImageAnnotation, ImageOptions, LabelAnnotation, LabelOptions,
    SimpleAnnotation, options::parse_group,
};

/// Annotation section of a chart configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnotationConfig {
    /// Items in drawing order, kept verbatim
    pub items: Vec<Value>,
    /// Options shared by every image annotation
    pub image_options: Option<Value>,
    /// Options shared by every label annotation
    pub label_options: Option<Value>,
}

/// Namespaced option group of an item, if it is an object
fn namespace<'a>(item: &'a Value, key: &str) -> Option<&'a Value> {
    item.get(key).filter(|v| v.is_object())
}

/// Build annotations for every configured item, in order
pub fn create_annotations(config: &AnnotationConfig) -> Vec<Annotation> {
    let image_defaults = config
        .image_options
        .as_ref()
        .map(parse_group::<ImageOptions>)
        .unwrap_or_default();
    let label_defaults = config
        .label_options
        .as_ref()
        .map(parse_group::<LabelOptions>)
        .unwrap_or_default();

    let annotations: Vec<Annotation> = config
        .items
        .iter()
        .map(|item| create_annotation(item, &image_defaults, &label_defaults))
        .collect();

    log::debug!("Created {} annotations", annotations.len());
    annotations
}

fn create_annotation(
    item: &Value,
    image_defaults: &ImageOptions,
    label_defaults: &LabelOptions,
) -> Annotation {
    if let Some(label) = namespace(item, "label") {
        let own: LabelOptions = parse_group(label);
        return Annotation::Label(LabelAnnotation {
            item: item.clone(),
            options: label_defaults.merge(&own),
            coords: Coords::default(),
        });
    }

    if let Some(image) = namespace(item, "image") {
        let own: ImageOptions = parse_group(image);
        return Annotation::Image(ImageAnnotation {
            item: item.clone(),
            options: image_defaults.merge(&own),
            coords: Coords::default(),
        });
    }

    Annotation::Simple(SimpleAnnotation {
        item: item.clone(),
        coords: Coords::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnnotationKind;
    use serde_json::json;

    fn config(value: Value) -> AnnotationConfig {
        serde_json::from_value(value).unwrap()
    }

    fn first(value: Value) -> Annotation {
        create_annotations(&config(value)).remove(0)
    }

    #[test]
    fn test_simple_annotation() {
        let annotation = first(json!({ "items": [{ "x": 0, "y": 0 }] }));
        assert_eq!(annotation.kind(), AnnotationKind::Simple);
    }

    #[test]
    fn test_image_annotation() {
        let annotation = first(json!({ "items": [{ "x": 0, "y": 0, "image": { "url": "some_url" } }] }));
        assert_eq!(annotation.kind(), AnnotationKind::Image);
    }

    #[test]
    fn test_label_annotation_with_empty_options() {
        let annotation = first(json!({ "items": [{ "x": 0, "y": 0, "label": {} }] }));
        assert_eq!(annotation.kind(), AnnotationKind::Label);
    }

    #[test]
    fn test_label_wins_over_image() {
        let annotation = first(json!({
            "items": [{ "image": { "url": "u" }, "label": { "text": "t" } }]
        }));
        assert_eq!(annotation.kind(), AnnotationKind::Label);
    }

    #[test]
    fn test_non_object_namespaces_make_simple_annotations() {
        let annotation = first(json!({ "items": [{ "image": null, "label": "text" }] }));
        assert_eq!(annotation.kind(), AnnotationKind::Simple);
    }

    #[test]
    fn test_order_is_preserved() {
        let annotations = create_annotations(&config(json!({
            "items": [
                { "label": {} },
                { "x": 1 },
                { "image": {} }
            ]
        })));
        let kinds: Vec<_> = annotations.iter().map(Annotation::kind).collect();
        assert_eq!(
            kinds,
            vec![
                AnnotationKind::Label,
                AnnotationKind::Simple,
                AnnotationKind::Image
            ]
        );
    }

    #[test]
    fn test_empty_items() {
        assert!(create_annotations(&AnnotationConfig::default()).is_empty());
    }

    #[test]
    fn test_shared_image_options_fill_gaps() {
        let annotation = first(json!({
            "imageOptions": { "height": 10, "url": "default_url" },
            "items": [{ "x": 10, "y": 20, "image": { "url": "some_url", "width": 10 } }]
        }));
        let Annotation::Image(image) = annotation else {
            panic!("expected image annotation");
        };
        assert_eq!(image.options.url.as_deref(), Some("some_url"));
        assert_eq!(image.options.width, Some(10.0));
        assert_eq!(image.options.height, Some(10.0));
        assert_eq!(image.options.location, None);
    }

    #[test]
    fn test_shared_label_options_do_not_apply_to_images() {
        let annotation = first(json!({
            "labelOptions": { "text": "shared" },
            "items": [{ "image": { "url": "u" } }]
        }));
        assert_eq!(annotation.kind(), AnnotationKind::Image);
    }

    #[test]
    fn test_item_is_kept_verbatim() {
        let item = json!({ "x": 0, "y": 0, "opt_1": "opt_1" });
        let annotation = first(json!({ "items": [item.clone()] }));
        assert_eq!(annotation.item(), &item);
    }
}
