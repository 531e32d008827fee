//! Shared geometry for annotation drawing
//!
//! Constants and math used by the draw dispatch and by both back ends
//! (SVG serialization and tiny-skia rasterization).

/// Simple marker geometry constants
pub mod marker {
    /// Radius of a simple annotation marker in canvas units
    pub const RADIUS: f64 = 5.0;
    /// Shadow/outline thickness around a marker
    pub const OUTLINE: f32 = 1.5;
    /// Distance within which a point hits a drawn annotation
    pub const HIT_RADIUS: f64 = 10.0;
}

/// Raster output limits
pub mod raster {
    /// Largest canvas or picture side, in pixels
    pub const MAX_DIMENSION: u32 = 8_192;
}

/// Top-left corner of a box centered on `(x, y)`
///
/// An absent dimension does not offset that axis.
#[inline]
pub fn centered_origin(x: f64, y: f64, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
    (
        x - width.unwrap_or(0.0) / 2.0,
        y - height.unwrap_or(0.0) / 2.0,
    )
}

/// SVG `preserveAspectRatio` for an image location hint
///
/// Unknown hints map to `None` and leave the renderer default in place.
pub fn aspect_ratio(location: &str) -> Option<&'static str> {
    let value = match location.to_ascii_lowercase().as_str() {
        "full" => "none",
        "lefttop" => "xMinYMin",
        "leftcenter" => "xMinYMid",
        "leftbottom" => "xMinYMax",
        "centertop" => "xMidYMin",
        "center" => "xMidYMid",
        "centerbottom" => "xMidYMax",
        "righttop" => "xMaxYMin",
        "rightcenter" => "xMaxYMid",
        "rightbottom" => "xMaxYMax",
        _ => return None,
    };
    Some(value)
}

/// Pixel offset of a fitted picture inside its box, following the location hint
///
/// `free` is the leftover space on each axis after fitting.
pub fn location_offset(location: Option<&str>, free_w: u32, free_h: u32) -> (u32, u32) {
    let Some(ratio) = location.and_then(aspect_ratio) else {
        return (free_w / 2, free_h / 2);
    };
    if ratio == "none" {
        return (0, 0);
    }
    let dx = match &ratio[..4] {
        "xMin" => 0,
        "xMax" => free_w,
        _ => free_w / 2,
    };
    let dy = match &ratio[4..] {
        "YMin" => 0,
        "YMax" => free_h,
        _ => free_h / 2,
    };
    (dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_origin() {
        assert_eq!(
            centered_origin(100.0, 200.0, Some(10.0), Some(10.0)),
            (95.0, 195.0)
        );
        assert_eq!(centered_origin(100.0, 200.0, None, Some(20.0)), (100.0, 190.0));
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio("full"), Some("none"));
        assert_eq!(aspect_ratio("centerBottom"), Some("xMidYMax"));
        assert_eq!(aspect_ratio("some_location"), None);
    }

    #[test]
    fn test_location_offset() {
        assert_eq!(location_offset(None, 10, 20), (5, 10));
        assert_eq!(location_offset(Some("lefttop"), 10, 20), (0, 0));
        assert_eq!(location_offset(Some("rightbottom"), 10, 20), (10, 20));
        assert_eq!(location_offset(Some("full"), 10, 20), (0, 0));
    }
}
