//! Player character

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::components::{CombatStats, Health, Position};
use crate::items::{EquipChange, Equipment, Inventory, Item, ItemId};
use crate::progression::levels_to_gain;

/// Range of the starting attack and defense rolls
pub const STARTING_STAT_MAX: i32 = 5;

/// Outcome of using or equipping an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemUse {
    Equipped { replaced: Option<ItemId> },
    Unequipped,
    Drank { healed: i32 },
}

/// The player character. Persists across descents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub stats: CombatStats,
    pub health: Health,
    pub inventory: Inventory,
    pub equipment: Equipment,
    pub experience: u32,
    pub level: u32,
}

impl Player {
    /// Create a player with randomly rolled base attack and defense
    pub fn new(position: Position, max_hp: i32, rng: &mut impl Rng) -> Self {
        let stats = CombatStats::new(
            rng.gen_range(0..=STARTING_STAT_MAX),
            rng.gen_range(0..=STARTING_STAT_MAX),
        );
        Self::with_stats(position, stats, max_hp)
    }

    pub fn with_stats(position: Position, stats: CombatStats, max_hp: i32) -> Self {
        Self {
            name: "Knight".to_string(),
            position,
            stats,
            health: Health::new(max_hp),
            inventory: Inventory::new(),
            equipment: Equipment::new(),
            experience: 0,
            level: 1,
        }
    }

    /// Base attack plus equipped bonuses
    pub fn total_attack(&self) -> i32 {
        self.stats.attack + self.equipment.total_attack(&self.inventory)
    }

    /// Base defense plus equipped bonuses
    pub fn total_defense(&self) -> i32 {
        self.stats.defense + self.equipment.total_defense(&self.inventory)
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Add experience and apply any level-ups. Returns levels gained.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        self.check_level_up()
    }

    /// Apply pending level-ups; each one adds +1 attack and +1 defense
    pub fn check_level_up(&mut self) -> u32 {
        let gained = levels_to_gain(self.level, self.experience);
        if gained > 0 {
            self.level += gained;
            self.stats.attack += gained as i32;
            self.stats.defense += gained as i32;
            log::debug!("Player reached level {}", self.level);
        }
        gained
    }

    /// Equip/unequip gear or drink a potion at the given inventory index
    pub fn use_or_equip(&mut self, index: usize) -> Option<ItemUse> {
        let item = self.inventory.get(index)?;
        if item.is_potion() {
            let heal = item.heal;
            self.inventory.remove_at(index);
            let healed = self.health.heal(heal);
            return Some(ItemUse::Drank { healed });
        }

        match self.equipment.toggle(item) {
            EquipChange::Equipped { replaced } => Some(ItemUse::Equipped { replaced }),
            EquipChange::Unequipped => Some(ItemUse::Unequipped),
            EquipChange::NotEquippable => None,
        }
    }

    /// Remove the item at index, taking it off first if worn
    pub fn drop_item(&mut self, index: usize) -> Option<Item> {
        let id = self.inventory.get(index)?.id;
        self.equipment.unequip_id(id);
        self.inventory.remove_at(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn player() -> Player {
        Player::with_stats(Position::new(1, 1), CombatStats::new(3, 2), 100)
    }

    #[test]
    fn test_starting_stats_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let p = Player::new(Position::new(1, 1), 100, &mut rng);
            assert!((0..=STARTING_STAT_MAX).contains(&p.stats.attack));
            assert!((0..=STARTING_STAT_MAX).contains(&p.stats.defense));
            assert_eq!(p.health.current, 100);
            assert_eq!(p.level, 1);
        }
    }

    #[test]
    fn test_level_up_raises_stats() {
        let mut p = player();
        assert_eq!(p.gain_experience(999), 0);
        assert_eq!(p.gain_experience(1), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.stats, CombatStats::new(4, 3));
    }

    #[test]
    fn test_level_never_decreases() {
        let mut p = player();
        let mut last = p.level;
        for _ in 0..40 {
            p.gain_experience(250);
            assert!(p.level >= last);
            last = p.level;
        }
    }

    #[test]
    fn test_boss_kill_grants_every_level_it_clears() {
        let mut p = player();
        p.experience = 1500;
        p.check_level_up();
        assert_eq!(p.level, 2);
        // 1500 + 1000 = 2500 clears the 2000 threshold only
        assert_eq!(p.gain_experience(1000), 1);
        // A single jump across two thresholds grants both levels
        assert_eq!(p.gain_experience(3500), 2);
        assert_eq!(p.level, 5);
    }

    #[test]
    fn test_totals_include_equipment() {
        let mut p = player();
        p.inventory.add_item(Item::gear(ItemId(1), ItemCategory::Sword, 5, 1));
        assert_eq!(p.total_attack(), 3);
        p.use_or_equip(0);
        assert_eq!(p.total_attack(), 8);
        assert_eq!(p.total_defense(), 3);
    }

    #[test]
    fn test_drinking_potion_heals_and_consumes() {
        let mut p = player();
        p.health.take_damage(50);
        p.inventory.add_item(Item::potion(ItemId(1), 30));
        assert_eq!(p.use_or_equip(0), Some(ItemUse::Drank { healed: 30 }));
        assert!(p.inventory.is_empty());
        assert_eq!(p.health.current, 80);
    }

    #[test]
    fn test_potion_heal_clamped_to_max() {
        let mut p = player();
        p.health.take_damage(10);
        p.inventory.add_item(Item::potion(ItemId(1), 30));
        assert_eq!(p.use_or_equip(0), Some(ItemUse::Drank { healed: 10 }));
        assert_eq!(p.health.current, p.health.max);
    }

    #[test]
    fn test_drop_unequips() {
        let mut p = player();
        p.inventory.add_item(Item::gear(ItemId(1), ItemCategory::Shield, 0, 4));
        p.use_or_equip(0);
        assert_eq!(p.total_defense(), 6);
        let dropped = p.drop_item(0).unwrap();
        assert_eq!(dropped.id, ItemId(1));
        assert!(!p.equipment.is_equipped(ItemId(1)));
        assert_eq!(p.total_defense(), 2);
    }

    #[test]
    fn test_empty_inventory_actions_are_noops() {
        let mut p = player();
        assert_eq!(p.use_or_equip(0), None);
        assert!(p.drop_item(0).is_none());
    }
}
