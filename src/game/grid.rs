use std::collections::HashSet;
use std::sync::Arc;

use slotmap::SecondaryMap;

use super::item::ItemId;
use super::shape::{Cell, Shape};

/// Fixed-extent placement authority. Each cell holds at most one item id;
/// a placed item's id appears in every cell of its translated footprint and
/// nowhere else, and distinct items' footprints never intersect.
///
/// Items enter only through `try_place` and leave only through `remove`.
/// Bounds and overlap are the only rejection reasons here; anything else
/// (currency, level gates) belongs to the callers.
pub struct GridStore {
    width: u32,
    height: u32,
    cells: Vec<Option<ItemId>>,
    /// Bounding-box origin of each placed item.
    origins: SecondaryMap<ItemId, Cell>,
    /// Shape of each placed item, so removal and moves need no caller
    /// bookkeeping.
    shapes: SecondaryMap<ItemId, Arc<Shape>>,
}

impl GridStore {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
            origins: SecondaryMap::new(),
            shapes: SecondaryMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.0 >= 0 && cell.1 >= 0 && cell.0 < self.width as i32 && cell.1 < self.height as i32
    }

    fn index(&self, cell: Cell) -> usize {
        (cell.1 as u32 * self.width + cell.0 as u32) as usize
    }

    /// Item occupying `cell`, if any. Out-of-bounds cells are empty.
    pub fn item_at(&self, cell: Cell) -> Option<ItemId> {
        if !self.in_bounds(cell) {
            return None;
        }
        self.cells[self.index(cell)]
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.origins.contains_key(item)
    }

    /// Bounding-box origin `item` was placed at.
    pub fn origin_of(&self, item: ItemId) -> Option<Cell> {
        self.origins.get(item).copied()
    }

    pub fn shape_of(&self, item: ItemId) -> Option<&Arc<Shape>> {
        self.shapes.get(item)
    }

    /// Whether `shape` fits at `origin`: every translated occupied cell is
    /// in bounds and either empty or already held by `item` itself, so a
    /// placed item re-validates at its current position.
    pub fn can_place(&self, item: ItemId, shape: &Shape, origin: Cell) -> bool {
        for &(cx, cy) in shape.occupied_cells() {
            let cell = (origin.0 + cx, origin.1 + cy);
            if !self.in_bounds(cell) {
                return false;
            }
            match self.cells[self.index(cell)] {
                None => {}
                Some(other) if other == item => {}
                Some(_) => return false,
            }
        }
        true
    }

    /// Validate, then move: the item's current cells (if it is already
    /// placed) are cleared before the new footprint is written. Returns
    /// false with no side effects when the placement is rejected.
    pub fn try_place(&mut self, item: ItemId, shape: &Arc<Shape>, origin: Cell) -> bool {
        if !self.can_place(item, shape, origin) {
            return false;
        }
        self.clear_cells(item);
        for &(cx, cy) in shape.occupied_cells() {
            let idx = self.index((origin.0 + cx, origin.1 + cy));
            self.cells[idx] = Some(item);
        }
        self.origins.insert(item, origin);
        self.shapes.insert(item, shape.clone());
        true
    }

    /// Clears every cell referencing `item`. No-op when it isn't placed.
    pub fn remove(&mut self, item: ItemId) {
        self.clear_cells(item);
        self.origins.remove(item);
        self.shapes.remove(item);
    }

    fn clear_cells(&mut self, item: ItemId) {
        for cell in &mut self.cells {
            if *cell == Some(item) {
                *cell = None;
            }
        }
    }

    /// Distinct items currently on the grid.
    pub fn placed_items(&self) -> HashSet<ItemId> {
        self.cells.iter().flatten().copied().collect()
    }
}
