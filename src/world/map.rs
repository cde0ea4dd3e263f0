//! Map data structure
//!
//! The 2D grid representing a dungeon level.

use serde::{Deserialize, Serialize};

use super::tile::Tile;
use crate::entities::Position;

/// A dungeon level grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<Tile>,
}

impl Map {
    /// Create a new map filled with walls
    pub fn new(width: i32, height: i32) -> Self {
        let tiles = vec![Tile::Wall; (width.max(0) * height.max(0)) as usize];
        Self { width, height, tiles }
    }

    /// Create a map with a wall border and an open floor interior
    pub fn bordered(width: i32, height: i32) -> Self {
        let mut map = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if !map.is_border(x, y) {
                    map.set_tile(x, y, Tile::Floor);
                }
            }
        }
        map
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get tile at position
    pub fn get_tile(&self, x: i32, y: i32) -> Option<Tile> {
        if self.in_bounds(x, y) {
            Some(self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Set tile at position (ignored out of bounds)
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            self.tiles[idx] = tile;
        }
    }

    /// Check if a position is walkable
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get_tile(pos.x, pos.y).is_some_and(|t| t.is_walkable())
    }

    /// True when the cell lies on the outer ring
    pub fn is_border(&self, x: i32, y: i32) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }
}
