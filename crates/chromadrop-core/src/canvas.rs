//! In-memory document host.

use crate::color::Color;
use crate::error::{ChromaError, ChromaResult};
use crate::gradient::{GradientDescriptor, GradientKind};
use crate::host::{DocumentHost, DocumentItem, ItemId};
use crate::shapes::{Rectangle, Shape, ShapeId};
use kurbo::{Rect, Size};
use peniko::Brush;
use std::collections::HashMap;
use uuid::Uuid;

/// A document containing shapes in stacking order.
#[derive(Debug, Clone)]
pub struct CanvasDocument {
    /// All shapes in the document, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    pub z_order: Vec<ShapeId>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            shapes: HashMap::new(),
            z_order: Vec::new(),
        }
    }

    /// Add a shape on top of the stack.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// A document plus the editor state the apply bridge reads: selection,
/// viewport, and where new shapes go.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub document: CanvasDocument,
    /// Currently selected shape IDs, in selection order.
    pub selection: Vec<ShapeId>,
    /// Visible viewport, `None` when the editor does not report one.
    pub viewport: Option<Size>,
    /// Container new shapes are inserted into. `None` when no page is active.
    pub insertion_parent: Option<Uuid>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a canvas with an empty document and an active page.
    pub fn new() -> Self {
        Self::with_document(CanvasDocument::new())
    }

    pub fn with_document(document: CanvasDocument) -> Self {
        Self {
            document,
            selection: Vec::new(),
            viewport: None,
            insertion_parent: Some(Uuid::new_v4()),
        }
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport = Some(Size::new(width, height));
    }

    /// Select a single shape, replacing the current selection.
    pub fn select(&mut self, id: ShapeId) {
        self.selection = vec![id];
    }

    pub fn add_to_selection(&mut self, id: ShapeId) {
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id)
    }

    /// Add a shape and return its id.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        self.document.add_shape(shape)
    }

    pub fn remove_shape(&mut self, id: ShapeId) {
        self.document.remove_shape(id);
        self.selection.retain(|&s| s != id);
    }
}

impl DocumentHost for Canvas {
    type Fill = Brush;

    fn selection(&self) -> Vec<ItemId> {
        self.selection.clone()
    }

    fn item(&self, id: ItemId) -> Option<&dyn DocumentItem<Brush>> {
        self.document
            .get_shape(id)
            .map(|shape| shape as &dyn DocumentItem<Brush>)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut dyn DocumentItem<Brush>> {
        self.document
            .get_shape_mut(id)
            .map(|shape| shape as &mut dyn DocumentItem<Brush>)
    }

    fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    fn make_color_fill(&mut self, color: Color) -> ChromaResult<Brush> {
        Ok(Brush::Solid(color.into()))
    }

    fn make_linear_gradient_fill(
        &mut self,
        descriptor: &GradientDescriptor,
        bounds: Rect,
    ) -> ChromaResult<Brush> {
        gradient_fill(descriptor, GradientKind::Linear, bounds)
    }

    fn make_radial_gradient_fill(
        &mut self,
        descriptor: &GradientDescriptor,
        bounds: Rect,
    ) -> ChromaResult<Brush> {
        gradient_fill(descriptor, GradientKind::Radial, bounds)
    }

    fn insert_rectangle(&mut self, bounds: Rect, fill: Brush) -> ChromaResult<ItemId> {
        let Some(parent) = self.insertion_parent else {
            return Err(ChromaError::NoInsertionContext);
        };
        let id = self.add_shape(Shape::Rectangle(Rectangle::filled(bounds, fill)));
        log::debug!("Inserted rectangle {id} into {parent}");
        Ok(id)
    }

    fn set_selection(&mut self, items: &[ItemId]) {
        self.selection = items.to_vec();
    }
}

fn gradient_fill(
    descriptor: &GradientDescriptor,
    expected: GradientKind,
    bounds: Rect,
) -> ChromaResult<Brush> {
    if descriptor.kind != expected {
        return Err(ChromaError::UnsupportedGradientType(descriptor.kind.to_string()));
    }
    if !descriptor.is_renderable() {
        return Err(ChromaError::InsufficientStops {
            found: descriptor.stops.len(),
        });
    }
    Ok(descriptor.to_brush(bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::build_descriptor;
    use crate::shapes::{Ellipse, Line};
    use kurbo::Point;

    #[test]
    fn test_document_creation() {
        let doc = CanvasDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.shapes_ordered().count(), 0);
    }

    #[test]
    fn test_add_and_remove_shape() {
        let mut doc = CanvasDocument::new();
        let id = doc.add_shape(Shape::Rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0)));
        assert_eq!(doc.len(), 1);
        assert!(doc.get_shape(id).is_some());
        assert!(doc.remove_shape(id).is_some());
        assert!(doc.is_empty());
        assert!(doc.z_order.is_empty());
    }

    #[test]
    fn test_z_order() {
        let mut doc = CanvasDocument::new();
        let a = doc.add_shape(Shape::Rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0)));
        let b = doc.add_shape(Shape::Ellipse(Ellipse::new(Point::ZERO, 5.0, 5.0)));
        let ids: Vec<_> = doc.shapes_ordered().map(Shape::id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_canvas_selection() {
        let mut canvas = Canvas::new();
        let a = canvas.add_shape(Shape::Rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0)));
        let b = canvas.add_shape(Shape::Line(Line::new(Point::ZERO, Point::new(5.0, 5.0))));
        canvas.select(a);
        canvas.add_to_selection(b);
        canvas.add_to_selection(b);
        assert_eq!(DocumentHost::selection(&canvas), vec![a, b]);
        canvas.remove_shape(a);
        assert!(!canvas.is_selected(a));
        canvas.clear_selection();
        assert!(DocumentHost::selection(&canvas).is_empty());
    }

    #[test]
    fn test_item_capability() {
        let mut canvas = Canvas::new();
        let rect = canvas.add_shape(Shape::Rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0)));
        let line = canvas.add_shape(Shape::Line(Line::new(Point::ZERO, Point::new(5.0, 5.0))));
        assert!(canvas.item(rect).is_some_and(|item| item.supports_fill()));
        assert!(canvas.item(line).is_some_and(|item| !item.supports_fill()));
        assert!(canvas.item(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_insert_rectangle() {
        let mut canvas = Canvas::new();
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let id = canvas
            .insert_rectangle(bounds, Brush::Solid(peniko::Color::WHITE))
            .unwrap();
        let shape = canvas.document.get_shape(id).unwrap();
        assert_eq!(shape.bounds(), bounds);
        assert_eq!(shape.fill(), Some(&Brush::Solid(peniko::Color::WHITE)));
    }

    #[test]
    fn test_insert_without_context() {
        let mut canvas = Canvas::new();
        canvas.insertion_parent = None;
        let result = canvas.insert_rectangle(Rect::ZERO, Brush::Solid(peniko::Color::WHITE));
        assert_eq!(result, Err(ChromaError::NoInsertionContext));
        assert!(canvas.document.is_empty());
    }

    #[test]
    fn test_gradient_fill_kind_must_match() {
        let mut canvas = Canvas::new();
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let radial = build_descriptor(&["#000000", "#ffffff"], GradientKind::Radial, 0).unwrap();
        assert!(canvas.make_radial_gradient_fill(&radial, bounds).is_ok());
        assert!(matches!(
            canvas.make_linear_gradient_fill(&radial, bounds),
            Err(ChromaError::UnsupportedGradientType(_))
        ));
    }

    #[test]
    fn test_color_fill() {
        let mut canvas = Canvas::new();
        let fill = canvas
            .make_color_fill(Color::from(crate::color::Rgb8::new(255, 0, 0)))
            .unwrap();
        assert_eq!(fill, Brush::Solid(peniko::Color::from_rgba8(255, 0, 0, 255)));
    }
}
