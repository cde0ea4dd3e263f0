//! Equipment system
//!
//! Tracks which inventory items are worn. Slots hold item ids, never the
//! items themselves; the inventory stays the single owner.

use serde::{Deserialize, Serialize};

use super::inventory::Inventory;
use super::item::{EquipSlot, Item, ItemId};

/// Result of toggling an item's equipped state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipChange {
    /// Item is now worn, optionally replacing the previous occupant
    Equipped { replaced: Option<ItemId> },
    /// Item was worn and has been taken off
    Unequipped,
    /// Item has no slot (potions)
    NotEquippable,
}

/// Player equipment slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    slots: [Option<ItemId>; EquipSlot::COUNT],
}

impl Equipment {
    pub fn new() -> Self {
        Self { slots: [None; EquipSlot::COUNT] }
    }

    /// Get item id in a slot
    pub fn get(&self, slot: EquipSlot) -> Option<ItemId> {
        self.slots[slot.index()]
    }

    /// Check if a slot is empty
    pub fn is_empty(&self, slot: EquipSlot) -> bool {
        self.get(slot).is_none()
    }

    pub fn is_equipped(&self, id: ItemId) -> bool {
        self.slots.iter().any(|s| *s == Some(id))
    }

    /// Equip the item, or take it off if it is already worn
    pub fn toggle(&mut self, item: &Item) -> EquipChange {
        let Some(slot) = item.equip_slot() else {
            return EquipChange::NotEquippable;
        };
        let current = &mut self.slots[slot.index()];
        if *current == Some(item.id) {
            *current = None;
            EquipChange::Unequipped
        } else {
            let replaced = current.replace(item.id);
            EquipChange::Equipped { replaced }
        }
    }

    /// Clear whichever slot references this id
    pub fn unequip_id(&mut self, id: ItemId) -> bool {
        for slot in self.slots.iter_mut() {
            if *slot == Some(id) {
                *slot = None;
                return true;
            }
        }
        false
    }

    /// Resolve equipped ids against the inventory
    pub fn equipped_items<'a>(&'a self, inventory: &'a Inventory) -> impl Iterator<Item = &'a Item> + 'a {
        self.slots
            .iter()
            .flatten()
            .filter_map(move |id| inventory.get_by_id(*id))
    }

    /// Calculate total attack bonus from equipment
    pub fn total_attack(&self, inventory: &Inventory) -> i32 {
        self.equipped_items(inventory).map(|i| i.attack).sum()
    }

    /// Calculate total defense bonus from equipment
    pub fn total_defense(&self, inventory: &Inventory) -> i32 {
        self.equipped_items(inventory).map(|i| i.defense).sum()
    }
}
