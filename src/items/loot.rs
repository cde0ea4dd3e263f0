//! Loot generation
//!
//! Random items for chests and monster drops. Better monsters and deeper
//! levels roll higher bonuses.

use rand::seq::SliceRandom;
use rand::Rng;

use super::item::{Item, ItemCategory, ItemId};

/// Flat part of the bonus cap
pub const BASE_BONUS: i32 = 5;
/// Hard ceiling on the primary bonus
pub const BONUS_CAP: i32 = 15;

/// Highest primary bonus for an item rolled at this depth from a monster
/// worth `exp_value` experience (0 for chests)
pub fn max_bonus(depth: u32, exp_value: u32) -> i32 {
    (BASE_BONUS + depth as i32 + (exp_value / 100) as i32).min(BONUS_CAP)
}

/// Generate a random piece of loot
pub fn generate_loot(
    id: ItemId,
    depth: u32,
    exp_value: u32,
    potion_chance: f64,
    potion_heal: i32,
    rng: &mut impl Rng,
) -> Item {
    if rng.gen_bool(potion_chance) {
        return Item::potion(id, potion_heal);
    }

    let category = *ItemCategory::GEAR
        .choose(rng)
        .unwrap_or(&ItemCategory::Sword);
    let cap = max_bonus(depth, exp_value);
    let primary = rng.gen_range(1..=cap);
    let secondary = rng.gen_range(0..=cap / 2);

    let (attack, defense) = if category == ItemCategory::Sword {
        (primary, secondary)
    } else {
        (secondary, primary)
    };

    Item::gear(id, category, attack, defense)
}
