//! Geometric types for annotation anchors and resolved canvas coordinates

use serde::Serialize;

/// Canvas coordinates resolved by a host for one annotation
///
/// Either component may be absent when the host cannot place the annotation
/// (no argument, value outside the visible range, and so on).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Coords {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Coords {
    /// Create fully resolved coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Coordinates the host could not resolve at all
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Both components, if both are present and finite
    pub fn point(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }

    /// Squared distance to a point, if these coordinates are resolved
    pub fn distance_sq_to(&self, x: f64, y: f64) -> Option<f64> {
        let (cx, cy) = self.point()?;
        let dx = cx - x;
        let dy = cy - y;
        Some(dx * dx + dy * dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_requires_both_components() {
        assert_eq!(Coords::new(100.0, 200.0).point(), Some((100.0, 200.0)));
        assert_eq!(Coords::unresolved().point(), None);
        assert_eq!(
            Coords {
                x: Some(100.0),
                y: None
            }
            .point(),
            None
        );
        assert_eq!(
            Coords {
                x: None,
                y: Some(100.0)
            }
            .point(),
            None
        );
    }

    #[test]
    fn test_point_rejects_nan() {
        let coords = Coords {
            x: Some(f64::NAN),
            y: Some(1.0),
        };
        assert_eq!(coords.point(), None);
    }

    #[test]
    fn test_distance_sq_to() {
        let coords = Coords::new(3.0, 4.0);
        assert_eq!(coords.distance_sq_to(0.0, 0.0), Some(25.0));
        assert_eq!(Coords::unresolved().distance_sq_to(0.0, 0.0), None);
    }
}
