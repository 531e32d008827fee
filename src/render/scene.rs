//! Recording drawing surface
//!
//! `Scene` keeps every created primitive together with its style and the
//! group it belongs to. The SVG and raster back ends both render from it.

use crate::domain::Style;

use super::surface::{DrawSurface, ElementId, GroupId};

/// A drawing primitive as requested by an annotation
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
    },
    Image {
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
        url: Option<String>,
        location: Option<String>,
    },
    Text {
        content: String,
        x: f64,
        y: f64,
    },
}

/// A primitive with its applied style and owning group
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub primitive: Primitive,
    pub style: Style,
    pub parent: Option<GroupId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    pub name: String,
    pub children: Vec<ElementId>,
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    elements: Vec<Element>,
    groups: Vec<Group>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    #[cfg(test)]
    pub(crate) fn group_by_name(&self, name: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .position(|g| g.name == name)
            .map(GroupId)
    }

    /// Elements of a group in append order
    pub fn children(&self, group: GroupId) -> impl Iterator<Item = &Element> {
        self.groups
            .get(group.0)
            .into_iter()
            .flat_map(|g| g.children.iter())
            .filter_map(move |id| self.elements.get(id.0))
    }

    /// Every attached element, group by group
    pub fn rendered(&self) -> impl Iterator<Item = &Element> {
        (0..self.groups.len()).flat_map(move |i| self.children(GroupId(i)))
    }

    /// Count of created primitives matching a predicate, attached or not
    pub fn count(&self, f: impl Fn(&Primitive) -> bool) -> usize {
        self.elements.iter().filter(|e| f(&e.primitive)).count()
    }

    fn push(&mut self, primitive: Primitive) -> ElementId {
        self.elements.push(Element {
            primitive,
            style: Style::new(),
            parent: None,
        });
        ElementId(self.elements.len() - 1)
    }
}

impl DrawSurface for Scene {
    fn group(&mut self, name: &str) -> GroupId {
        self.groups.push(Group {
            name: name.to_string(),
            children: Vec::new(),
        });
        GroupId(self.groups.len() - 1)
    }

    fn circle(&mut self, cx: f64, cy: f64, radius: f64) -> ElementId {
        self.push(Primitive::Circle { cx, cy, radius })
    }

    fn image(
        &mut self,
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
        url: Option<&str>,
        location: Option<&str>,
    ) -> ElementId {
        self.push(Primitive::Image {
            x,
            y,
            width,
            height,
            url: url.map(str::to_string),
            location: location.map(str::to_string),
        })
    }

    fn text(&mut self, content: &str, x: f64, y: f64) -> ElementId {
        self.push(Primitive::Text {
            content: content.to_string(),
            x,
            y,
        })
    }

    fn css(&mut self, element: ElementId, style: &Style) {
        let Some(el) = self.elements.get_mut(element.0) else {
            log::warn!("css on unknown element {:?}", element);
            return;
        };
        for (key, value) in style {
            el.style.insert(*key, value.clone());
        }
    }

    fn append(&mut self, element: ElementId, group: GroupId) {
        if group.0 >= self.groups.len() {
            log::warn!("append to unknown group {:?}", group);
            return;
        }
        let Some(el) = self.elements.get_mut(element.0) else {
            log::warn!("append of unknown element {:?}", element);
            return;
        };

        // An element lives in at most one group
        if let Some(previous) = el.parent.replace(group) {
            self.groups[previous.0].children.retain(|id| *id != element);
        }
        self.groups[group.0].children.push(element);
    }

    fn clear(&mut self, group: GroupId) {
        let Some(g) = self.groups.get_mut(group.0) else {
            return;
        };
        for id in g.children.drain(..) {
            if let Some(el) = self.elements.get_mut(id.0) {
                el.parent = None;
            }
        }
    }
}
