//! Mapping CSS gradient geometry onto an item's bounding box.

use super::{GradientDescriptor, GradientKind};
use kurbo::{Point, Rect, Vec2};
use peniko::{Brush, Gradient};

/// Start and end of the CSS gradient line for `angle_degrees` across `bounds`.
///
/// 0deg points up and angles grow clockwise; the line is long enough that
/// the corners of the box land exactly on the first and last stop.
pub fn linear_endpoints(angle_degrees: u16, bounds: Rect) -> (Point, Point) {
    let theta = (angle_degrees as f64).to_radians();
    let (sin, cos) = theta.sin_cos();
    let direction = Vec2::new(sin, -cos);
    let half_length = (bounds.width() * sin.abs() + bounds.height() * cos.abs()) / 2.0;
    let center = bounds.center();
    (
        center - direction * half_length,
        center + direction * half_length,
    )
}

/// Center and radius of a `circle` gradient sized to the farthest corner.
pub fn radial_extent(bounds: Rect) -> (Point, f64) {
    (bounds.center(), bounds.width().hypot(bounds.height()) / 2.0)
}

impl GradientDescriptor {
    /// Build a paint brush for an item occupying `bounds`.
    pub fn to_brush(&self, bounds: Rect) -> Brush {
        let stops: Vec<peniko::ColorStop> = self
            .stops
            .iter()
            .map(|stop| peniko::ColorStop::from((stop.position as f32, peniko::Color::from(stop.color))))
            .collect();
        let gradient = match self.kind {
            GradientKind::Linear => {
                let (start, end) = linear_endpoints(self.angle_degrees, bounds);
                Gradient::new_linear(start, end)
            }
            GradientKind::Radial => {
                let (center, radius) = radial_extent(bounds);
                Gradient::new_radial(center, radius as f32)
            }
        };
        Brush::Gradient(gradient.with_stops(stops.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::build_descriptor;

    fn assert_point(actual: Point, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < 1e-9 && (actual.y - y).abs() < 1e-9,
            "expected ({x}, {y}), got {actual:?}"
        );
    }

    #[test]
    fn test_linear_zero_points_up() {
        let (start, end) = linear_endpoints(0, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_point(start, 50.0, 50.0);
        assert_point(end, 50.0, 0.0);
    }

    #[test]
    fn test_linear_ninety_points_right() {
        let (start, end) = linear_endpoints(90, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_point(start, 0.0, 25.0);
        assert_point(end, 100.0, 25.0);
    }

    #[test]
    fn test_linear_diagonal_reaches_corners() {
        let (start, end) = linear_endpoints(45, Rect::new(0.0, 0.0, 100.0, 100.0));
        // Length is the square's diagonal.
        assert!(((end - start).hypot() - 100.0 * 2f64.sqrt()).abs() < 1e-9);
        assert_point(start, 0.0, 100.0);
        assert_point(end, 100.0, 0.0);
    }

    #[test]
    fn test_radial_farthest_corner() {
        let (center, radius) = radial_extent(Rect::new(10.0, 10.0, 40.0, 50.0));
        assert_point(center, 25.0, 30.0);
        assert!((radius - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_to_brush_builds_gradient() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let d = build_descriptor(&["#ff0000", "#00ff00", "#0000ff"], GradientKind::Radial, 0).unwrap();
        match d.to_brush(bounds) {
            Brush::Gradient(gradient) => assert_eq!(gradient.stops.len(), 3),
            other => panic!("expected a gradient brush, got {other:?}"),
        }
    }
}
