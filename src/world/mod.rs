//! World module
//!
//! Contains the tile grid and level generation.

pub mod map;
pub mod tile;
pub mod level;

pub use map::Map;
pub use tile::Tile;
pub use level::{generate_level, Level};
