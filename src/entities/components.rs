//! Shared entity components
//!
//! Plain data shared by the player and monsters: grid position, health pool
//! and combat stats.

use serde::{Deserialize, Serialize};

// ============================================================================
// Position & Movement
// ============================================================================

/// Position on the level grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (allows diagonal)
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Squared Euclidean distance
    pub fn distance_sq(&self, other: &Position) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Within melee range: one of the 8 neighbours or the same cell
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.chebyshev_distance(other) <= 1
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }
}

/// Cardinal movement directions for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

// ============================================================================
// Combat Stats
// ============================================================================

/// Health pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Subtract damage, never going below zero. Returns damage actually taken.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.current);
        self.current -= actual;
        actual
    }

    /// Restore HP up to max. Returns the amount healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.max - self.current);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percentage(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// Base attack and defense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatStats {
    pub attack: i32,
    pub defense: i32,
}

impl CombatStats {
    pub fn new(attack: i32, defense: i32) -> Self {
        Self { attack, defense }
    }
}
