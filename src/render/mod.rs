//! Annotation rendering module
//!
//! This module contains:
//! - Capability traits between annotations, hosts and surfaces
//! - A recording surface (`Scene`) used as the display list
//! - Geometry shared between the SVG and raster back ends
//! - SVG serialization and tiny-skia rasterization of a scene

pub mod geometry;
pub mod image;
pub mod scene;
pub mod surface;
pub mod svg;

use crate::config::{ShapeColor, VizmarkConfig};

/// Presentation settings the back ends apply on top of element styles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub marker_color: ShapeColor,
    pub marker_shadow: bool,
    pub background: Option<ShapeColor>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from(&VizmarkConfig::default())
    }
}

impl From<&VizmarkConfig> for RenderStyle {
    fn from(config: &VizmarkConfig) -> Self {
        Self {
            marker_color: config.marker_color,
            marker_shadow: config.marker_shadow,
            background: config.background,
        }
    }
}
