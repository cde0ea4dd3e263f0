//! Inventory system
//!
//! Ordered list of owned items.

use serde::{Deserialize, Serialize};

use super::item::{Item, ItemId};

/// Player inventory, in pickup order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Get current number of items
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Get item by index
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Get item by ID
    pub fn get_by_id(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get_by_id(id).is_some()
    }

    /// Remove an item by index
    pub fn remove_at(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Get all items
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemCategory;

    #[test]
    fn test_add_and_remove_preserves_order() {
        let mut inv = Inventory::new();
        inv.add_item(Item::gear(ItemId(1), ItemCategory::Sword, 1, 0));
        inv.add_item(Item::gear(ItemId(2), ItemCategory::Boots, 0, 1));
        inv.add_item(Item::potion(ItemId(3), 30));

        let removed = inv.remove_at(1).unwrap();
        assert_eq!(removed.id, ItemId(2));
        let ids: Vec<_> = inv.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![ItemId(1), ItemId(3)]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut inv = Inventory::new();
        assert!(inv.remove_at(0).is_none());
    }
}
