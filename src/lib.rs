//! Delve - a small turn-based dungeon crawler
//!
//! Explore bordered levels, fight goblins, trolls and dragons, loot chests
//! and take the stairs down until the last level.

pub mod config;
pub mod error;
pub mod game;
pub mod world;
pub mod entities;
pub mod ai;
pub mod combat;
pub mod items;
pub mod progression;
pub mod ui;
pub mod render;

// Re-export commonly used types
pub use config::GameConfig;
pub use error::GameError;
pub use game::{Game, Intent, RunOutcome, Snapshot, TurnDriver};
pub use world::map::Map;
