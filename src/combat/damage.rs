//! Damage calculation

use rand::Rng;

/// Result of a single hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    /// Damage actually subtracted from the target's HP
    pub damage: i32,
    pub is_crit: bool,
}

/// Damage dealt by `attack` against `defense`. A crit ignores defense.
/// Always at least 1.
pub fn calculate_damage(attack: i32, defense: i32, is_crit: bool) -> i32 {
    let defense = if is_crit { 0 } else { defense };
    (attack - defense).max(1)
}

/// Roll whether a hit is critical
pub fn roll_crit(crit_chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen_bool(crit_chance.clamp(0.0, 1.0))
}
