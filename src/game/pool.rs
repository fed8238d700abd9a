use std::collections::HashSet;

use super::item::ItemId;

/// Unplaced items — "storage" in the UI. An item belongs to exactly one of
/// {pool, grid} at any time; the drag session maintains that invariant.
#[derive(Clone, Debug, Default)]
pub struct Pool {
    items: HashSet<ItemId>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the item was already in the pool.
    pub fn add(&mut self, item: ItemId) -> bool {
        self.items.insert(item)
    }

    /// Returns false if the item was not in the pool.
    pub fn remove(&mut self, item: ItemId) -> bool {
        self.items.remove(&item)
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().copied()
    }
}
