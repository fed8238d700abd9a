use std::sync::Arc;

use crate::game::grid::GridStore;
use crate::game::item::ItemId;
use crate::game::pool::Pool;
use crate::game::shape::{Cell, Shape};

use super::pickup::resolve_pickup;

/// Where a drag lifted its item from, kept for restoration on failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOrigin {
    FromPool,
    FromGrid(Cell),
}

/// How an active drag ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// Commit succeeded at the target.
    Placed,
    /// Commit failed; the pool-originated item never left the pool.
    LeftInPool,
    /// The item went back to its original grid cells (failed commit or a
    /// cancelled grid drag).
    Restored,
    /// The item left the grid for the pool: dropped outside the grid, or
    /// the fallback when restoration itself fails.
    ReturnedToPool,
    /// Pool-originated cancel; nothing changed.
    Cancelled,
}

impl DragOutcome {
    /// Whether the placed-item set changed, i.e. the equipment sink fires.
    pub fn equipment_changed(self) -> bool {
        matches!(self, Self::Placed | Self::ReturnedToPool)
    }
}

/// One pick-up → hover → drop interaction. At most one session exists at a
/// time; `GridScreen` enforces that.
#[derive(Debug)]
pub struct DragSession {
    item: ItemId,
    shape: Arc<Shape>,
    origin: DragOrigin,
    pickup: Cell,
    hover: Option<Cell>,
}

impl DragSession {
    /// Lift `item`. A grid-originated item is removed from the grid right
    /// away so hover validation sees its old cells as free. A
    /// pool-originated item stays in the pool until a commit succeeds.
    pub fn start(
        item: ItemId,
        shape: Arc<Shape>,
        origin: DragOrigin,
        clicked: Option<Cell>,
        grid: &mut GridStore,
    ) -> Self {
        let pickup = resolve_pickup(&shape, clicked);
        if let DragOrigin::FromGrid(_) = origin {
            grid.remove(item);
        }
        log::debug!("drag start: {item:?} from {origin:?}, anchor {pickup:?}");
        Self {
            item,
            shape,
            origin,
            pickup,
            hover: None,
        }
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn shape(&self) -> &Arc<Shape> {
        &self.shape
    }

    pub fn origin(&self) -> DragOrigin {
        self.origin
    }

    pub fn pickup(&self) -> Cell {
        self.pickup
    }

    pub fn hover(&self) -> Option<Cell> {
        self.hover
    }

    /// Grid origin the footprint would occupy if dropped on `hover_cell`:
    /// the anchor cell sits under the pointer, so the bounding box starts
    /// `pickup` cells up and to the left of it.
    pub fn placement_origin(&self, hover_cell: Cell) -> Cell {
        (hover_cell.0 - self.pickup.0, hover_cell.1 - self.pickup.1)
    }

    /// Record the hovered grid cell and report placement validity for the
    /// highlight. Read-only with respect to the grid.
    pub fn update_hover(&mut self, cell: Option<Cell>, grid: &GridStore) -> Option<bool> {
        self.hover = cell;
        cell.map(|c| grid.can_place(self.item, &self.shape, self.placement_origin(c)))
    }

    /// Pointer released over grid cell `target`.
    pub fn commit(self, target: Cell, grid: &mut GridStore, pool: &mut Pool) -> DragOutcome {
        let origin = self.placement_origin(target);
        if grid.try_place(self.item, &self.shape, origin) {
            if self.origin == DragOrigin::FromPool {
                pool.remove(self.item);
            }
            log::debug!("drag commit: {:?} placed at {origin:?}", self.item);
            return DragOutcome::Placed;
        }
        self.restore(grid, pool)
    }

    /// Pointer released outside the grid. Only a grid-originated item
    /// changes anything: it was lifted off the grid at start and now goes
    /// to the pool. A pool-originated item never left the pool.
    pub fn drop_outside(self, pool: &mut Pool) -> DragOutcome {
        match self.origin {
            DragOrigin::FromGrid(_) => {
                pool.add(self.item);
                DragOutcome::ReturnedToPool
            }
            DragOrigin::FromPool => DragOutcome::Cancelled,
        }
    }

    /// Explicit cancel input. A pool-originated drag never mutated
    /// anything; a grid-originated drag is put back like a failed commit.
    pub fn cancel(self, grid: &mut GridStore, pool: &mut Pool) -> DragOutcome {
        match self.origin {
            DragOrigin::FromPool => DragOutcome::Cancelled,
            DragOrigin::FromGrid(_) => self.restore(grid, pool),
        }
    }

    fn restore(self, grid: &mut GridStore, pool: &mut Pool) -> DragOutcome {
        match self.origin {
            DragOrigin::FromPool => DragOutcome::LeftInPool,
            DragOrigin::FromGrid(cell) => {
                if grid.try_place(self.item, &self.shape, cell) {
                    DragOutcome::Restored
                } else {
                    // The original cells got taken mid-drag; never lose
                    // the item.
                    log::warn!(
                        "could not restore {:?} to {cell:?}, returning it to the pool",
                        self.item
                    );
                    pool.add(self.item);
                    DragOutcome::ReturnedToPool
                }
            }
        }
    }
}
