//! Ellipse shape.

use super::{ShapeId, ShapeStyle};
use kurbo::{Point, Rect};
use uuid::Uuid;

/// An ellipse, takes a fill like a rectangle does.
#[derive(Debug, Clone)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    pub style: ShapeStyle,
}

impl Ellipse {
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius_x,
            radius_y,
            style: ShapeStyle::default(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius_x,
            self.center.y - self.radius_y,
            self.center.x + self.radius_x,
            self.center.y + self.radius_y,
        )
    }
}
