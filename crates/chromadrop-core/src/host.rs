//! The host document as seen from the sandbox.
//!
//! Items are opaque handles: the only thing the bridge asks of an item is its
//! id, its bounds, and whether it exposes the fill capability. The document
//! itself is owned by the host application; implementations only need to
//! answer queries and perform single mutations when asked.

use crate::color::Color;
use crate::error::ChromaResult;
use crate::gradient::GradientDescriptor;
use kurbo::{Rect, Size};
use uuid::Uuid;

/// Identifier of a document item.
pub type ItemId = Uuid;

/// Capability of an item to carry a fill of the host's fill type `F`.
pub trait Fillable<F> {
    /// Current fill, if any.
    fn fill(&self) -> Option<&F>;

    /// Replace the fill. Hosts may refuse (locked items, unsupported paints).
    fn set_fill(&mut self, fill: F) -> ChromaResult<()>;
}

/// A handle to one item of the host document.
pub trait DocumentItem<F> {
    fn id(&self) -> ItemId;

    /// Bounding box in document coordinates.
    fn bounds(&self) -> Rect;

    /// The fill capability, if this item has one.
    fn fillable(&self) -> Option<&dyn Fillable<F>>;

    fn fillable_mut(&mut self) -> Option<&mut dyn Fillable<F>>;

    fn supports_fill(&self) -> bool {
        self.fillable().is_some()
    }
}

/// Operations the apply bridge needs from the host application.
///
/// The host serializes access; every call happens within one apply request.
pub trait DocumentHost {
    /// Host-native fill object.
    type Fill;

    /// Currently selected items, in selection order.
    fn selection(&self) -> Vec<ItemId>;

    fn item(&self, id: ItemId) -> Option<&dyn DocumentItem<Self::Fill>>;

    fn item_mut(&mut self, id: ItemId) -> Option<&mut dyn DocumentItem<Self::Fill>>;

    /// Visible viewport size, if the host reports one.
    fn viewport(&self) -> Option<Size>;

    fn make_color_fill(&mut self, color: Color) -> ChromaResult<Self::Fill>;

    /// Linear gradient fill laid out over `bounds`.
    fn make_linear_gradient_fill(
        &mut self,
        descriptor: &GradientDescriptor,
        bounds: Rect,
    ) -> ChromaResult<Self::Fill>;

    /// Radial gradient fill laid out over `bounds`.
    fn make_radial_gradient_fill(
        &mut self,
        descriptor: &GradientDescriptor,
        bounds: Rect,
    ) -> ChromaResult<Self::Fill>;

    /// Create a rectangle with the given fill in the current insertion context.
    fn insert_rectangle(&mut self, bounds: Rect, fill: Self::Fill) -> ChromaResult<ItemId>;

    fn set_selection(&mut self, items: &[ItemId]);
}
