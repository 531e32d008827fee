//! Chart host: places annotations with two linear axes and owns the surface

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::annotations::{AnnotationConfig, create_annotations};
use crate::config::VizmarkConfig;
use crate::domain::{Annotation, Coords};
use crate::render::geometry::marker;
use crate::render::surface::{AnnotationHost, CoordinateResolver, DrawSurface, GroupId};

/// Name of the group annotations are drawn into
pub const ANNOTATIONS_GROUP: &str = "annotations";

/// Visible range of one axis
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
}

impl Default for Axis {
    fn default() -> Self {
        Self { min: 0.0, max: 100.0 }
    }
}

impl Axis {
    /// Fraction of the axis covered up to `value`, if it is visible
    pub fn fraction(&self, value: f64) -> Option<f64> {
        let span = self.max - self.min;
        if !span.is_finite() || span <= 0.0 || !value.is_finite() {
            return None;
        }
        if value < self.min || value > self.max {
            return None;
        }
        Some((value - self.min) / span)
    }
}

/// Drawing area and its axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub argument_axis: Axis,
    pub value_axis: Axis,
}

impl Canvas {
    /// Canvas x for an argument
    pub fn project_x(&self, argument: f64) -> Option<f64> {
        self.argument_axis
            .fraction(argument)
            .map(|f| f * f64::from(self.width))
    }

    /// Canvas y for a value; values grow upwards
    pub fn project_y(&self, value: f64) -> Option<f64> {
        self.value_axis
            .fraction(value)
            .map(|f| f64::from(self.height) - f * f64::from(self.height))
    }
}

/// Chart document read by the command line tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartDocument {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub argument_axis: Axis,
    pub value_axis: Axis,
    pub annotations: AnnotationConfig,
}

impl ChartDocument {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read chart document {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("Invalid chart document {}", path.display()))
    }

    pub fn parse(data: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Canvas of this document, sized from the config when unset
    pub fn canvas(&self, config: &VizmarkConfig) -> Canvas {
        Canvas {
            width: self.width.unwrap_or(config.canvas_width),
            height: self.height.unwrap_or(config.canvas_height),
            argument_axis: self.argument_axis,
            value_axis: self.value_axis,
        }
    }
}

/// A chart holding annotations and the surface they are drawn on
pub struct Chart<S: DrawSurface> {
    canvas: Canvas,
    renderer: S,
    annotations: Vec<Annotation>,
    group: Option<GroupId>,
}

impl<S: DrawSurface> Chart<S> {
    pub fn new(canvas: Canvas, renderer: S) -> Self {
        Self {
            canvas,
            renderer,
            annotations: Vec::new(),
            group: None,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Replace the chart's annotations with ones built from `config`
    pub fn set_annotations(&mut self, config: &AnnotationConfig) {
        self.annotations = create_annotations(config);
    }

    /// Redraw every annotation into the annotations group
    ///
    /// Returns how many annotations were drawn.
    pub fn draw_annotations(&mut self) -> usize {
        let group = match self.group {
            Some(group) => {
                self.renderer.clear(group);
                group
            }
            None => {
                let group = self.renderer.group(ANNOTATIONS_GROUP);
                self.group = Some(group);
                group
            }
        };

        let mut annotations = std::mem::take(&mut self.annotations);
        let drawn = annotations
            .iter_mut()
            .filter_map(|annotation| annotation.draw(self, group))
            .count();
        self.annotations = annotations;

        log::debug!(
            "Drew {} of {} annotations",
            drawn,
            self.annotations.len()
        );
        drawn
    }

    /// Drawn annotation nearest to a canvas point, for tooltips
    pub fn annotation_at(&self, x: f64, y: f64) -> Option<&Annotation> {
        let limit = marker::HIT_RADIUS * marker::HIT_RADIUS;
        self.annotations
            .iter()
            .filter_map(|a| a.tooltip_params().distance_sq_to(x, y).map(|d| (d, a)))
            .filter(|(d, _)| *d <= limit)
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, annotation)| annotation)
    }

    pub fn renderer(&self) -> &S {
        &self.renderer
    }

    pub fn into_renderer(self) -> S {
        self.renderer
    }
}

impl<S: DrawSurface> CoordinateResolver for Chart<S> {
    fn annotation_coords(&self, annotation: &Annotation) -> Coords {
        Coords {
            x: annotation.argument().and_then(|x| self.canvas.project_x(x)),
            y: annotation.value().and_then(|y| self.canvas.project_y(y)),
        }
    }
}

impl<S: DrawSurface> AnnotationHost for Chart<S> {
    type Surface = S;

    fn renderer(&mut self) -> &mut S {
        &mut self.renderer
    }
}
