//! Render snapshots
//!
//! An owned, read-only picture of the game after a turn. Front-ends draw
//! from this and nothing else.

use serde::Serialize;

use super::intent::InputMode;
use super::state::{MessageCategory, TurnPhase};
use crate::entities::{Archetype, Position};
use crate::items::{ItemCategory, ItemId};
use crate::world::Map;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonsterView {
    pub archetype: Archetype,
    pub name: &'static str,
    pub glyph: char,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub name: String,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    /// `hp / max_hp`, for health bars
    pub hp_fraction: f32,
    pub attack: i32,
    pub defense: i32,
    pub experience: u32,
    pub level: u32,
    /// Total experience needed for the next level
    pub next_level_exp: u32,
    /// Progress through the current level, `0.0..=1.0`
    pub exp_progress: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryEntry {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    pub description: String,
    pub equipped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryView {
    pub items: Vec<InventoryEntry>,
    pub cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageView {
    pub text: String,
    pub category: MessageCategory,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub turn: u64,
    pub depth: u32,
    pub max_depth: u32,
    pub phase: TurnPhase,
    pub mode: InputMode,
    pub map: Map,
    pub chests: Vec<Position>,
    pub stairs: Position,
    pub monsters: Vec<MonsterView>,
    pub player: PlayerView,
    pub inventory: InventoryView,
    /// Oldest first
    pub messages: Vec<MessageView>,
}

impl Snapshot {
    /// One-line stats summary shared by the front-ends
    pub fn stats_line(&self) -> String {
        format!(
            "Depth: {}/{}  HP: {}/{}  Atk: {}  Def: {}  Exp: {}  Lvl: {}",
            self.depth,
            self.max_depth,
            self.player.hp,
            self.player.max_hp,
            self.player.attack,
            self.player.defense,
            self.player.experience,
            self.player.level
        )
    }

    /// Monster standing on `pos`, if any
    pub fn monster_at(&self, pos: Position) -> Option<&MonsterView> {
        self.monsters.iter().find(|m| m.position == pos)
    }

    /// Glyph for a cell, drawing entities over the terrain
    pub fn glyph_at(&self, pos: Position) -> char {
        if self.player.position == pos {
            '@'
        } else if let Some(monster) = self.monster_at(pos) {
            monster.glyph
        } else if self.chests.contains(&pos) {
            'C'
        } else if self.stairs == pos {
            '>'
        } else {
            self.map.get_tile(pos.x, pos.y).map(|t| t.glyph()).unwrap_or(' ')
        }
    }
}
