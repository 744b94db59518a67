//! Shapes of the in-memory host document.

mod ellipse;
mod image;
mod line;
mod rectangle;

pub use ellipse::Ellipse;
pub use image::Image;
pub use line::Line;
pub use rectangle::Rectangle;

use crate::error::{ChromaError, ChromaResult};
use crate::host::{DocumentItem, Fillable, ItemId};
use kurbo::Rect;
use peniko::Brush;

/// Unique identifier for shapes.
pub type ShapeId = ItemId;

/// Fill state of a closed shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeStyle {
    /// Fill paint (None = no fill).
    pub fill: Option<Brush>,
    /// Locked shapes refuse fill edits.
    pub locked: bool,
}

impl Fillable<Brush> for ShapeStyle {
    fn fill(&self) -> Option<&Brush> {
        self.fill.as_ref()
    }

    fn set_fill(&mut self, fill: Brush) -> ChromaResult<()> {
        if self.locked {
            return Err(ChromaError::PlatformFillFailure("shape is locked".into()));
        }
        self.fill = Some(fill);
        Ok(())
    }
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone)]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Line(Line),
    Image(Image),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id,
            Shape::Ellipse(s) => s.id,
            Shape::Line(s) => s.id,
            Shape::Image(s) => s.id,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.as_rect(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Image(s) => s.bounds(),
        }
    }

    /// Current fill paint, if the shape has one.
    pub fn fill(&self) -> Option<&Brush> {
        self.fillable().and_then(|f| f.fill())
    }
}

impl DocumentItem<Brush> for Shape {
    fn id(&self) -> ItemId {
        Shape::id(self)
    }

    fn bounds(&self) -> Rect {
        Shape::bounds(self)
    }

    // Lines only stroke and images carry their own pixels, so neither takes a fill.
    fn fillable(&self) -> Option<&dyn Fillable<Brush>> {
        match self {
            Shape::Rectangle(s) => Some(&s.style as &dyn Fillable<Brush>),
            Shape::Ellipse(s) => Some(&s.style as &dyn Fillable<Brush>),
            Shape::Line(_) | Shape::Image(_) => None,
        }
    }

    fn fillable_mut(&mut self) -> Option<&mut dyn Fillable<Brush>> {
        match self {
            Shape::Rectangle(s) => Some(&mut s.style as &mut dyn Fillable<Brush>),
            Shape::Ellipse(s) => Some(&mut s.style as &mut dyn Fillable<Brush>),
            Shape::Line(_) | Shape::Image(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use peniko::Color;

    #[test]
    fn test_fill_capability() {
        let rect = Shape::Rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0));
        let ellipse = Shape::Ellipse(Ellipse::new(Point::ZERO, 5.0, 5.0));
        let line = Shape::Line(Line::new(Point::ZERO, Point::new(10.0, 10.0)));
        let image = Shape::Image(Image::new(Point::ZERO, 20.0, 10.0));
        assert!(rect.supports_fill());
        assert!(ellipse.supports_fill());
        assert!(!line.supports_fill());
        assert!(!image.supports_fill());
    }

    #[test]
    fn test_locked_style_rejects_fill() {
        let mut rect = Rectangle::new(Point::ZERO, 10.0, 10.0);
        rect.style.locked = true;
        let mut shape = Shape::Rectangle(rect);
        let result = shape
            .fillable_mut()
            .map(|f| f.set_fill(Brush::Solid(Color::WHITE)));
        assert!(matches!(result, Some(Err(ChromaError::PlatformFillFailure(_)))));
        assert!(shape.fill().is_none());
    }

    #[test]
    fn test_set_fill() {
        let mut shape = Shape::Ellipse(Ellipse::new(Point::ZERO, 5.0, 5.0));
        shape
            .fillable_mut()
            .unwrap()
            .set_fill(Brush::Solid(Color::WHITE))
            .unwrap();
        assert_eq!(shape.fill(), Some(&Brush::Solid(Color::WHITE)));
    }
}
