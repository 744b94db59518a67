//! Placed raster image.

use super::ShapeId;
use kurbo::{Point, Rect};
use uuid::Uuid;

/// A raster image placed in the document. Its pixels are its paint, so it has
/// no fill to replace.
#[derive(Debug, Clone)]
pub struct Image {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
}

impl Image {
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }
}
