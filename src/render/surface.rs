//! Capability traits between annotations, their host chart and the drawing surface

use crate::domain::{Annotation, Coords, Style};

/// Handle to a primitive created on a drawing surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// Handle to a container group on a drawing surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

/// Resolves where an annotation sits on the canvas
pub trait CoordinateResolver {
    fn annotation_coords(&self, annotation: &Annotation) -> Coords;
}

/// Primitive creation and container management
///
/// Created primitives are invisible until appended to a group.
pub trait DrawSurface {
    /// Create a new, empty group
    fn group(&mut self, name: &str) -> GroupId;

    fn circle(&mut self, cx: f64, cy: f64, radius: f64) -> ElementId;

    /// Create an image primitive with its top-left corner at `(x, y)`
    fn image(
        &mut self,
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
        url: Option<&str>,
        location: Option<&str>,
    ) -> ElementId;

    fn text(&mut self, content: &str, x: f64, y: f64) -> ElementId;

    /// Apply style properties to an element
    fn css(&mut self, element: ElementId, style: &Style);

    /// Attach an element to the end of a group
    fn append(&mut self, element: ElementId, group: GroupId);

    /// Detach every element of a group
    fn clear(&mut self, group: GroupId);
}

/// A chart able to place and draw annotations
pub trait AnnotationHost: CoordinateResolver {
    type Surface: DrawSurface;

    fn renderer(&mut self) -> &mut Self::Surface;
}
