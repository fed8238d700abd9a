use glam::Vec2;

use crate::game::item::ItemId;
use crate::game::shape::Cell;

/// One tick's worth of pointer state, filled in by the renderer. Mapping
/// the cursor to a grid cell or a storage slot is the renderer's job; the
/// screen only consumes the result.
#[derive(Clone, Debug, Default)]
pub struct PointerSnapshot {
    pub position: Vec2,
    /// Pointer went down this tick.
    pub pressed: bool,
    /// Pointer went up this tick.
    pub released: bool,
    /// Explicit cancel input fired this tick.
    pub cancel: bool,
    /// Grid cell under the pointer, if any.
    pub grid_cell: Option<Cell>,
    /// Storage slot under the pointer, if any.
    pub slot: Option<SlotHit>,
}

/// A storage slot the pointer is over, with the pointer converted into the
/// slot's local space (origin at the slot's top-left corner).
#[derive(Clone, Debug)]
pub struct SlotHit {
    pub item: ItemId,
    pub local_pos: Vec2,
}

impl PointerSnapshot {
    /// Snapshot with no button activity, hovering `grid_cell`.
    pub fn hover(grid_cell: Option<Cell>) -> Self {
        Self {
            grid_cell,
            ..Self::default()
        }
    }
}
