pub mod offset;
pub mod rect;

pub use offset::{LayoutNode, Positioned, ScrollOffset, resolve_offset, to_surface_local};
pub use rect::SelectionRect;
