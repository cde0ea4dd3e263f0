//! Game configuration
//!
//! Every tunable number of the game lives here. `GameConfig::default()` is
//! the fixed game; tests build smaller variants.

use crate::error::GameError;

/// Fixed game constants
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Map width in cells (including the wall border)
    pub map_width: i32,
    /// Map height in cells (including the wall border)
    pub map_height: i32,
    /// Chests placed on every level
    pub chest_count: usize,
    /// Monsters on a level before depth scaling
    pub base_monster_count: usize,
    /// Upper bound on monsters per level
    pub monster_cap: usize,
    /// Reaching the stairs on this depth wins the game
    pub max_depth: u32,
    /// Probability that a hit ignores defense
    pub crit_chance: f64,
    /// Probability that a slain monster drops an item
    pub drop_chance: f64,
    /// Probability that generated loot is a potion
    pub potion_chance: f64,
    /// HP restored by a potion
    pub potion_heal: i32,
    /// Squared distance under which monsters chase the player
    pub chase_radius_sq: i32,
    /// Rejection-sampling budget for a single feature placement
    pub placement_attempts: u32,
    /// Player starting (and maximum) HP
    pub player_max_hp: i32,
    /// Messages kept in the log
    pub message_log_len: usize,
}

impl GameConfig {
    pub const MAP_WIDTH: i32 = 40;
    pub const MAP_HEIGHT: i32 = 20;
    pub const CHEST_COUNT: usize = 5;
    pub const BASE_MONSTER_COUNT: usize = 9;
    pub const MONSTER_CAP: usize = 25;
    pub const MAX_DEPTH: u32 = 20;
    pub const CRIT_CHANCE: f64 = 0.10;
    pub const DROP_CHANCE: f64 = 0.30;
    pub const POTION_CHANCE: f64 = 0.20;
    pub const POTION_HEAL: i32 = 30;
    pub const CHASE_RADIUS_SQ: i32 = 9;
    pub const PLACEMENT_ATTEMPTS: u32 = 1000;
    pub const PLAYER_MAX_HP: i32 = 100;
    pub const MESSAGE_LOG_LEN: usize = 50;

    pub fn new() -> Self {
        Self {
            map_width: Self::MAP_WIDTH,
            map_height: Self::MAP_HEIGHT,
            chest_count: Self::CHEST_COUNT,
            base_monster_count: Self::BASE_MONSTER_COUNT,
            monster_cap: Self::MONSTER_CAP,
            max_depth: Self::MAX_DEPTH,
            crit_chance: Self::CRIT_CHANCE,
            drop_chance: Self::DROP_CHANCE,
            potion_chance: Self::POTION_CHANCE,
            potion_heal: Self::POTION_HEAL,
            chase_radius_sq: Self::CHASE_RADIUS_SQ,
            placement_attempts: Self::PLACEMENT_ATTEMPTS,
            player_max_hp: Self::PLAYER_MAX_HP,
            message_log_len: Self::MESSAGE_LOG_LEN,
        }
    }

    /// Number of monsters spawned on a given depth
    pub fn monster_count(&self, depth: u32) -> usize {
        (self.base_monster_count + depth as usize).min(self.monster_cap)
    }

    /// Interior (non-border) cells of the map
    pub fn interior_cells(&self) -> usize {
        ((self.map_width - 2).max(0) * (self.map_height - 2).max(0)) as usize
    }

    /// Reject configurations the level generator cannot satisfy
    pub fn validate(&self) -> Result<(), GameError> {
        if self.map_width < 3 || self.map_height < 3 {
            return Err(GameError::InvalidConfig(format!(
                "map {}x{} has no interior",
                self.map_width, self.map_height
            )));
        }
        if self.max_depth == 0 {
            return Err(GameError::InvalidConfig("max depth must be at least 1".into()));
        }
        // chests + monsters + player + stairs
        let needed = self.chest_count + self.monster_cap.max(self.base_monster_count) + 2;
        if needed > self.interior_cells() {
            return Err(GameError::InvalidConfig(format!(
                "{} features do not fit in {} floor cells",
                needed,
                self.interior_cells()
            )));
        }
        for (name, p) in [
            ("crit chance", self.crit_chance),
            ("drop chance", self.drop_chance),
            ("potion chance", self.potion_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GameError::InvalidConfig(format!("{} {} is not a probability", name, p)));
            }
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_monster_count_scales_and_caps() {
        let config = GameConfig::default();
        assert_eq!(config.monster_count(1), 10);
        assert_eq!(config.monster_count(5), 14);
        assert_eq!(config.monster_count(20), 25);
    }

    #[test]
    fn test_rejects_tiny_map() {
        let config = GameConfig { map_width: 2, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_overcrowded_map() {
        let config = GameConfig { map_width: 6, map_height: 6, ..GameConfig::default() };
        assert!(config.validate().is_err());
    }
}
