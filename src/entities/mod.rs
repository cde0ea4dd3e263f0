//! Player and monster records

pub mod components;
pub mod player;
pub mod monsters;

pub use components::{CombatStats, Direction, Health, Position};
pub use player::{ItemUse, Player};
pub use monsters::{roll_archetype, spawn_monster, Archetype, Monster, MonsterDef};
