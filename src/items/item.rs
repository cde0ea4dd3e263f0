//! Item definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique item identifier, issued by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// Hands out fresh item ids for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemIdGen {
    next: u64,
}

impl ItemIdGen {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> ItemId {
        let id = ItemId(self.next);
        self.next += 1;
        id
    }
}

impl Default for ItemIdGen {
    fn default() -> Self {
        Self::new()
    }
}

/// What kind of item this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Sword,
    Shield,
    Boots,
    Helmet,
    Potion,
}

impl ItemCategory {
    /// Categories that can be rolled as gear
    pub const GEAR: [ItemCategory; 4] = [
        ItemCategory::Sword,
        ItemCategory::Shield,
        ItemCategory::Boots,
        ItemCategory::Helmet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Sword => "Sword",
            ItemCategory::Shield => "Shield",
            ItemCategory::Boots => "Boots",
            ItemCategory::Helmet => "Helmet",
            ItemCategory::Potion => "Potion",
        }
    }

    /// The slot this category occupies when equipped, if any
    pub fn equip_slot(&self) -> Option<EquipSlot> {
        match self {
            ItemCategory::Sword => Some(EquipSlot::Weapon),
            ItemCategory::Shield => Some(EquipSlot::Shield),
            ItemCategory::Boots => Some(EquipSlot::Boots),
            ItemCategory::Helmet => Some(EquipSlot::Helmet),
            ItemCategory::Potion => None,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            ItemCategory::Sword => '/',
            ItemCategory::Shield => ')',
            ItemCategory::Boots => '"',
            ItemCategory::Helmet => '^',
            ItemCategory::Potion => '!',
        }
    }
}

/// Equipment slots, one item each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Weapon,
    Shield,
    Boots,
    Helmet,
}

impl EquipSlot {
    pub const COUNT: usize = 4;

    /// All slots in display order
    pub const ALL: [EquipSlot; EquipSlot::COUNT] = [
        EquipSlot::Weapon,
        EquipSlot::Shield,
        EquipSlot::Boots,
        EquipSlot::Helmet,
    ];

    pub fn index(&self) -> usize {
        match self {
            EquipSlot::Weapon => 0,
            EquipSlot::Shield => 1,
            EquipSlot::Boots => 2,
            EquipSlot::Helmet => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "Weapon",
            EquipSlot::Shield => "Shield",
            EquipSlot::Boots => "Boots",
            EquipSlot::Helmet => "Helmet",
        }
    }
}

/// An item. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    pub attack: i32,
    pub defense: i32,
    pub heal: i32,
}

impl Item {
    /// A piece of gear with attack/defense bonuses
    pub fn gear(id: ItemId, category: ItemCategory, attack: i32, defense: i32) -> Self {
        Self {
            id,
            name: format!("{} +{}", category.name(), attack + defense),
            category,
            attack,
            defense,
            heal: 0,
        }
    }

    /// A healing potion
    pub fn potion(id: ItemId, heal: i32) -> Self {
        Self {
            id,
            name: "Healing Potion".to_string(),
            category: ItemCategory::Potion,
            attack: 0,
            defense: 0,
            heal,
        }
    }

    pub fn is_potion(&self) -> bool {
        self.category == ItemCategory::Potion
    }

    pub fn equip_slot(&self) -> Option<EquipSlot> {
        self.category.equip_slot()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_potion() {
            write!(f, "{} [Heal: {}]", self.name, self.heal)
        } else {
            write!(
                f,
                "{} ({}) [Atk: {}, Def: {}]",
                self.name,
                self.category.name().to_lowercase(),
                self.attack,
                self.defense
            )
        }
    }
}
