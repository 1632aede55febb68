use egui::{Pos2, Vec2};

/// An element that sits at an offset inside its positioned parent.
pub trait Positioned {
    /// Offset of this element's top-left corner relative to its parent.
    fn offset(&self) -> Vec2;

    /// The nearest positioned ancestor, or `None` at the root.
    fn offset_parent(&self) -> Option<&dyn Positioned>;
}

/// A concrete containment chain used by the app and by tests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutNode {
    pub offset: Vec2,
    pub parent: Option<Box<LayoutNode>>,
}

impl LayoutNode {
    /// A node with no positioned ancestors.
    pub fn root(offset: Vec2) -> Self {
        Self { offset, parent: None }
    }

    /// Wraps `self` inside a child placed at `offset`.
    pub fn child(self, offset: Vec2) -> Self {
        Self {
            offset,
            parent: Some(Box::new(self)),
        }
    }
}

impl Positioned for LayoutNode {
    fn offset(&self) -> Vec2 {
        self.offset
    }

    fn offset_parent(&self) -> Option<&dyn Positioned> {
        self.parent.as_deref().map(|p| p as &dyn Positioned)
    }
}

/// Document scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub left: f32,
    pub top: f32,
}

impl ScrollOffset {
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// Document-space origin of `target`: the sum of offsets up to the root.
pub fn resolve_offset(target: &dyn Positioned) -> Vec2 {
    let mut total = Vec2::ZERO;
    let mut node = Some(target);
    while let Some(current) = node {
        total += current.offset();
        node = current.offset_parent();
    }
    total
}

/// Converts a document-space pointer position into surface-local coordinates.
///
/// `local = client - (offset - scroll)` on each axis.
pub fn to_surface_local(client: Pos2, surface_offset: Vec2, scroll: ScrollOffset) -> Pos2 {
    Pos2::new(
        client.x - (surface_offset.x - scroll.left),
        client.y - (surface_offset.y - scroll.top),
    )
}
