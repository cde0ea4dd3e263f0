//! Item system

pub mod item;
pub mod inventory;
pub mod equipment;
pub mod loot;

pub use item::{Item, ItemId, ItemIdGen, ItemCategory, EquipSlot};
pub use inventory::Inventory;
pub use equipment::{Equipment, EquipChange};
pub use loot::generate_loot;
