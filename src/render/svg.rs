//! SVG serialization of a scene

use std::fmt::Write;
use std::path::Path;

use anyhow::Context;

use super::RenderStyle;
use super::geometry::{self, marker};
use super::scene::{Element, Primitive, Scene};
use super::surface::GroupId;

/// Escape text for use in XML content and attribute values
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Element style as SVG presentation attributes
fn style_attributes(element: &Element) -> String {
    element
        .style
        .iter()
        .map(|(key, value)| format!(" {}=\"{}\"", key, escape(&value.to_string())))
        .collect()
}

fn write_element(out: &mut String, element: &Element, style: &RenderStyle) -> std::fmt::Result {
    let attrs = style_attributes(element);
    match &element.primitive {
        Primitive::Circle { cx, cy, radius } => {
            write!(
                out,
                "    <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"",
                cx,
                cy,
                radius,
                style.marker_color.to_hex()
            )?;
            if style.marker_shadow {
                write!(
                    out,
                    " stroke=\"#000000\" stroke-opacity=\"0.86\" stroke-width=\"{}\"",
                    marker::OUTLINE
                )?;
            }
            writeln!(out, "{}/>", attrs)
        }
        Primitive::Image {
            x,
            y,
            width,
            height,
            url,
            location,
        } => {
            write!(out, "    <image x=\"{}\" y=\"{}\"", x, y)?;
            if let Some(width) = width {
                write!(out, " width=\"{}\"", width)?;
            }
            if let Some(height) = height {
                write!(out, " height=\"{}\"", height)?;
            }
            if let Some(url) = url {
                write!(out, " href=\"{}\"", escape(url))?;
            }
            if let Some(ratio) = location.as_deref().and_then(geometry::aspect_ratio) {
                write!(out, " preserveAspectRatio=\"{}\"", ratio)?;
            }
            writeln!(out, "{}/>", attrs)
        }
        Primitive::Text { content, x, y } => writeln!(
            out,
            "    <text x=\"{}\" y=\"{}\"{}>{}</text>",
            x,
            y,
            attrs,
            escape(content)
        ),
    }
}

/// Serialize every attached element of a scene as an SVG document
pub fn scene_to_svg(scene: &Scene, width: u32, height: u32, style: &RenderStyle) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_document(&mut out, scene, width, height, style);
    out
}

fn write_document(
    out: &mut String,
    scene: &Scene,
    width: u32,
    height: u32,
    style: &RenderStyle,
) -> std::fmt::Result {
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = width,
        h = height
    )?;
    if let Some(background) = style.background {
        writeln!(
            out,
            "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            background.to_hex()
        )?;
    }
    for (index, group) in scene.groups().iter().enumerate() {
        writeln!(out, "  <g class=\"{}\">", escape(&group.name))?;
        for element in scene.children(GroupId(index)) {
            write_element(out, element, style)?;
        }
        writeln!(out, "  </g>")?;
    }
    writeln!(out, "</svg>")
}

/// Write a scene as an SVG file
pub fn save_svg(
    scene: &Scene,
    width: u32,
    height: u32,
    style: &RenderStyle,
    path: &Path,
) -> anyhow::Result<()> {
    std::fs::write(path, scene_to_svg(scene, width, height, style))
        .with_context(|| format!("Failed to write {}", path.display()))
}
