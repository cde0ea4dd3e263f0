//! Tile definitions

use serde::{Deserialize, Serialize};

/// Types of tiles in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    Wall,
}

impl Tile {
    pub fn is_walkable(&self) -> bool {
        matches!(self, Tile::Floor)
    }

    pub fn glyph(&self) -> char {
        match self {
            Tile::Floor => '.',
            Tile::Wall => '#',
        }
    }

    pub fn fg_color(&self) -> (u8, u8, u8) {
        match self {
            Tile::Floor => (80, 80, 80),
            Tile::Wall => (130, 110, 90),
        }
    }

    pub fn bg_color(&self) -> (u8, u8, u8) {
        match self {
            Tile::Floor => (20, 18, 15),
            Tile::Wall => (40, 35, 30),
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Wall
    }
}
