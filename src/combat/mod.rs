//! Combat system

pub mod damage;
pub mod resolver;

pub use damage::{calculate_damage, roll_crit, AttackResult};
pub use resolver::{monster_retaliation, player_attack, Kill, MonsterHit, PlayerAttack, Retaliation};
