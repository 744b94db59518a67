//! Line shape.

use super::ShapeId;
use kurbo::{Point, Rect};
use uuid::Uuid;

/// A line segment. Lines have no interior and never take a fill.
#[derive(Debug, Clone)]
pub struct Line {
    pub(crate) id: ShapeId,
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }
}
