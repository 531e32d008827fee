//! Image rendering for annotations using tiny-skia
//!
//! These functions draw a scene onto an RgbaImage for saving to disk.

use std::io;
use std::path::Path;

use anyhow::Context;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use tiny_skia::{ColorU8, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::RenderStyle;
use super::geometry::{self, marker, raster};
use super::scene::{Primitive, Scene};

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
///
/// Pixmap stores premultiplied colors, RgbaImage straight ones.
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let Some(size) = tiny_skia::IntSize::from_wh(img.width(), img.height()) else {
        return;
    };
    let data = img
        .pixels()
        .flat_map(|pixel| {
            let [r, g, b, a] = pixel.0;
            let c = ColorU8::from_rgba(r, g, b, a).premultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    let Some(mut pixmap) = Pixmap::from_vec(data, size) else {
        return;
    };

    f(&mut pixmap);

    for (pixel, c) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = c.demultiply();
        pixel.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }
}

/// Pixel size for a requested dimension, rejecting ones too large to allocate
fn pixel_dimension(value: f64) -> anyhow::Result<u32> {
    anyhow::ensure!(
        value.is_finite() && value <= f64::from(raster::MAX_DIMENSION),
        "Size {} exceeds the {} pixel limit",
        value,
        raster::MAX_DIMENSION
    );
    Ok(value.round().max(1.0) as u32)
}

/// Create a blank canvas filled with the configured background
pub fn new_canvas(width: u32, height: u32, style: &RenderStyle) -> anyhow::Result<RgbaImage> {
    anyhow::ensure!(
        width <= raster::MAX_DIMENSION && height <= raster::MAX_DIMENSION,
        "Canvas {}x{} exceeds the {} pixel limit",
        width,
        height,
        raster::MAX_DIMENSION
    );
    Ok(match style.background {
        Some(color) => RgbaImage::from_pixel(width, height, image::Rgba(color.to_rgba_u8())),
        None => RgbaImage::new(width, height),
    })
}

/// Draw filled circle markers, with an optional dark outline
fn draw_markers_on_image(img: &mut RgbaImage, markers: &[(f32, f32, f32)], style: &RenderStyle) {
    if markers.is_empty() {
        return;
    }

    with_pixmap(img, |pixmap| {
        let [r, g, b, a] = style.marker_color.to_rgba_u8();

        for &(cx, cy, radius) in markers {
            let Some(path) = PathBuilder::from_circle(cx, cy, radius) else {
                continue;
            };

            let mut paint = Paint::default();
            paint.set_color_rgba8(r, g, b, a);
            paint.anti_alias = true;
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

            if style.marker_shadow {
                let mut paint = Paint::default();
                paint.set_color_rgba8(0, 0, 0, 220);
                paint.anti_alias = true;

                let stroke = Stroke {
                    width: marker::OUTLINE,
                    ..Default::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
    });
}

/// Load a picture and fit it into the requested box
///
/// Returns the picture and its top-left corner on the canvas.
fn load_picture(
    url: &str,
    x: f64,
    y: f64,
    width: Option<f64>,
    height: Option<f64>,
    location: Option<&str>,
) -> anyhow::Result<(RgbaImage, i64, i64)> {
    let box_w = width.map(pixel_dimension).transpose()?;
    let box_h = height.map(pixel_dimension).transpose()?;

    let picture = image::open(url)
        .with_context(|| format!("Failed to load annotation image {}", url))?
        .to_rgba8();
    let (natural_w, natural_h) = (picture.width().max(1), picture.height().max(1));

    let box_w = box_w.unwrap_or(natural_w);
    let box_h = box_h.unwrap_or(natural_h);

    let stretch = location.and_then(geometry::aspect_ratio) == Some("none");
    let (fit_w, fit_h) = if stretch {
        (box_w, box_h)
    } else {
        let scale = (box_w as f64 / natural_w as f64).min(box_h as f64 / natural_h as f64);
        (
            ((natural_w as f64 * scale).round() as u32).max(1),
            ((natural_h as f64 * scale).round() as u32).max(1),
        )
    };

    let picture = if (fit_w, fit_h) == (natural_w, natural_h) {
        picture
    } else {
        imageops::resize(&picture, fit_w, fit_h, FilterType::Triangle)
    };

    let (dx, dy) = geometry::location_offset(
        location,
        box_w.saturating_sub(fit_w),
        box_h.saturating_sub(fit_h),
    );
    Ok((
        picture,
        x.round() as i64 + i64::from(dx),
        y.round() as i64 + i64::from(dy),
    ))
}

/// Draw every attached scene element in order
///
/// Text elements need a font engine and are left out of raster output.
pub fn draw_scene_on_image(img: &mut RgbaImage, scene: &Scene, style: &RenderStyle) {
    let mut markers = Vec::new();

    for element in scene.rendered() {
        match &element.primitive {
            Primitive::Circle { cx, cy, radius } => {
                markers.push((*cx as f32, *cy as f32, *radius as f32));
            }
            Primitive::Image {
                x,
                y,
                width,
                height,
                url,
                location,
            } => {
                // Keep layering: markers queued so far go below this picture
                draw_markers_on_image(img, &markers, style);
                markers.clear();

                let Some(url) = url else {
                    log::warn!("Skipping image annotation without url");
                    continue;
                };
                match load_picture(url, *x, *y, *width, *height, location.as_deref()) {
                    Ok((picture, left, top)) => imageops::overlay(img, &picture, left, top),
                    Err(err) => log::warn!("Skipping image annotation: {:?}", err),
                }
            }
            Primitive::Text { content, .. } => {
                log::debug!("Text annotation {:?} is not rasterized", content);
            }
        }
    }

    draw_markers_on_image(img, &markers, style);
}

pub fn save_png(img: &RgbaImage, path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(write_png(io::BufWriter::new(file), img)?)
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}
