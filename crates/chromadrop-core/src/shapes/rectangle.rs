//! Rectangle shape.

use super::{ShapeId, ShapeStyle};
use kurbo::{Point, Rect};
use peniko::Brush;
use uuid::Uuid;

/// An axis-aligned rectangle.
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style: ShapeStyle::default(),
        }
    }

    /// Create a rectangle covering `rect`, filled with `fill`.
    pub fn filled(rect: Rect, fill: Brush) -> Self {
        let rect = rect.abs();
        let mut shape = Self::new(rect.origin(), rect.width(), rect.height());
        shape.style.fill = Some(fill);
        shape
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::Color;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), 100.0, 50.0);
        assert!((rect.position.x - 10.0).abs() < f64::EPSILON);
        assert!((rect.position.y - 20.0).abs() < f64::EPSILON);
        assert!((rect.width - 100.0).abs() < f64::EPSILON);
        assert!((rect.height - 50.0).abs() < f64::EPSILON);
        assert!(rect.style.fill.is_none());
    }

    #[test]
    fn test_filled() {
        let bounds = Rect::new(350.0, 250.0, 450.0, 350.0);
        let rect = Rectangle::filled(bounds, Brush::Solid(Color::WHITE));
        assert_eq!(rect.as_rect(), bounds);
        assert_eq!(rect.style.fill, Some(Brush::Solid(Color::WHITE)));

        let flipped = Rectangle::filled(Rect::new(450.0, 350.0, 350.0, 250.0), Brush::Solid(Color::WHITE));
        assert_eq!(flipped.as_rect(), bounds);
    }
}
