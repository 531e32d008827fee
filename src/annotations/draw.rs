//! Drawing annotations through their host
//!
//! Coordinates are asked from the host on every draw and remembered for
//! tooltips. Each draw creates and appends a new primitive; clearing the
//! target group beforehand is the caller's job.

use crate::domain::Annotation;
use crate::render::geometry::{self, marker};
use crate::render::surface::{AnnotationHost, DrawSurface, ElementId, GroupId};

impl Annotation {
    /// Draw this annotation into `group` on the host's surface
    ///
    /// Returns the appended element, or `None` when the host could not
    /// resolve both coordinates.
    pub fn draw<H>(&mut self, host: &mut H, group: GroupId) -> Option<ElementId>
    where
        H: AnnotationHost + ?Sized,
    {
        let coords = host.annotation_coords(self);
        self.set_coords(coords);

        let Some((x, y)) = coords.point() else {
            log::trace!("Skipping {} annotation without coordinates", self.kind());
            return None;
        };

        let renderer = host.renderer();
        let element = match self {
            Annotation::Simple(_) => renderer.circle(x, y, marker::RADIUS),
            Annotation::Image(image) => {
                let options = &image.options;
                let (left, top) = geometry::centered_origin(x, y, options.width, options.height);
                renderer.image(
                    left,
                    top,
                    options.width,
                    options.height,
                    options.url.as_deref(),
                    options.location.as_deref(),
                )
            }
            Annotation::Label(label) => {
                let options = &label.options;
                let text = renderer.text(options.text.as_deref().unwrap_or_default(), x, y);
                let style = options.style();
                if !style.is_empty() {
                    renderer.css(text, &style);
                }
                text
            }
        };
        renderer.append(element, group);

        log::trace!("Drew {} annotation at ({}, {})", self.kind(), x, y);
        Some(element)
    }
}
