use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

use super::shape::Shape;

new_key_type! {
    /// Stable handle to one item instance. Generational index via SlotMap —
    /// safe to hold across insertions and removals.
    pub struct ItemId;
}

/// One owned item instance. Identity lives in the `ItemId` key; the shape
/// is shared by reference across instances of the same item type.
#[derive(Clone, Debug)]
pub struct Item {
    pub name: String,
    pub shape: Arc<Shape>,
}

/// Primary storage for the item instances a screen knows about. Grid and
/// pool hold ids only; the registry resolves them back to data.
pub struct ItemRegistry {
    items: SlotMap<ItemId, Item>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self {
            items: SlotMap::with_key(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, shape: Arc<Shape>) -> ItemId {
        self.items.insert(Item {
            name: name.into(),
            shape,
        })
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// The item's shape handle, cloned for the caller to hold during a drag.
    pub fn shape(&self, id: ItemId) -> Option<Arc<Shape>> {
        self.items.get(id).map(|item| item.shape.clone())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter()
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}
