//! Melee resolution
//!
//! The player strikes the first adjacent monster; monsters that end the turn
//! next to a player who stood still strike back.

use rand::Rng;

use super::damage::{calculate_damage, roll_crit, AttackResult};
use crate::config::GameConfig;
use crate::entities::{Archetype, Monster, Player};
use crate::items::{generate_loot, Item, ItemIdGen};
use crate::world::Level;

/// What happened when the monster died
#[derive(Debug, Clone, PartialEq)]
pub struct Kill {
    pub exp_gained: u32,
    pub levels_gained: u32,
    pub drop: Option<Item>,
}

/// Outcome of the player's attack
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAttack {
    pub target: Archetype,
    pub hit: AttackResult,
    pub kill: Option<Kill>,
}

/// One monster's hit on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterHit {
    pub attacker: Archetype,
    pub hit: AttackResult,
}

/// Outcome of the retaliation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Retaliation {
    pub hits: Vec<MonsterHit>,
    pub player_died: bool,
}

/// Attack the first monster adjacent to the player. `None` when nothing is
/// in reach.
///
/// A slain monster awards experience, may drop an item straight into the
/// inventory, and is removed from the level before returning.
pub fn player_attack(
    player: &mut Player,
    level: &mut Level,
    depth: u32,
    config: &GameConfig,
    item_ids: &mut ItemIdGen,
    rng: &mut impl Rng,
) -> Option<PlayerAttack> {
    let index = level
        .monsters
        .iter()
        .position(|m| !m.is_dead() && m.position.is_adjacent(&player.position))?;

    let is_crit = roll_crit(config.crit_chance, rng);
    let monster = &mut level.monsters[index];
    let raw = calculate_damage(player.total_attack(), monster.stats.defense, is_crit);
    let damage = monster.health.take_damage(raw);
    let target = monster.archetype;
    log::debug!(
        "Player hits {} for {}{} ({} HP left)",
        monster.name(),
        damage,
        if is_crit { " (crit)" } else { "" },
        monster.health.current
    );

    let kill = if monster.is_dead() {
        let exp_gained = monster.exp_value;
        let levels_gained = player.gain_experience(exp_gained);

        let drop = if rng.gen_bool(config.drop_chance) {
            let item = generate_loot(
                item_ids.next_id(),
                depth,
                exp_gained,
                config.potion_chance,
                config.potion_heal,
                rng,
            );
            player.inventory.add_item(item.clone());
            Some(item)
        } else {
            None
        };

        level.remove_dead_monsters();
        Some(Kill {
            exp_gained,
            levels_gained,
            drop,
        })
    } else {
        None
    };

    Some(PlayerAttack {
        target,
        hit: AttackResult { damage, is_crit },
        kill,
    })
}

/// Every live monster adjacent to the player attacks in list order. Stops as
/// soon as the player's HP reaches zero.
pub fn monster_retaliation(
    player: &mut Player,
    monsters: &[Monster],
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Retaliation {
    let mut result = Retaliation::default();
    let defense = player.total_defense();

    for monster in monsters {
        if monster.is_dead() || !monster.position.is_adjacent(&player.position) {
            continue;
        }
        let is_crit = roll_crit(config.crit_chance, rng);
        let raw = calculate_damage(monster.stats.attack, defense, is_crit);
        let damage = player.health.take_damage(raw);
        log::debug!("{} hits player for {}", monster.name(), damage);
        result.hits.push(MonsterHit {
            attacker: monster.archetype,
            hit: AttackResult { damage, is_crit },
        });
        if player.is_dead() {
            result.player_died = true;
            break;
        }
    }

    result
}
