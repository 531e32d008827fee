//! Chart annotations: markers, images and text labels anchored to chart points
//!
//! Annotation items are classified by [`annotations::create_annotations`] into
//! simple markers, images or labels, then drawn through an
//! [`render::surface::AnnotationHost`] that resolves their coordinates and
//! exposes a [`render::surface::DrawSurface`].
//!
//! ```
//! use vizmark::annotations::{AnnotationConfig, create_annotations};
//!
//! let config: AnnotationConfig = serde_json::from_str(
//!     r#"{ "items": [{ "x": 1, "y": 2, "label": { "text": "peak" } }] }"#,
//! )
//! .unwrap();
//! let annotations = create_annotations(&config);
//! assert_eq!(annotations[0].kind().name(), "label");
//! ```

pub mod annotations;
pub mod chart;
pub mod config;
pub mod domain;
pub mod render;

pub use annotations::{AnnotationConfig, create_annotations};
pub use chart::{Axis, Canvas, Chart, ChartDocument};
pub use domain::{Annotation, AnnotationKind, Coords};
