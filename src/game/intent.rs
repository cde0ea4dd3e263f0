//! Player intents
//!
//! Front-ends translate raw input into these; the game never sees keys.

use serde::{Deserialize, Serialize};

use crate::entities::Direction;

/// What the input layer expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    /// Walking the map
    Exploring,
    /// Inventory overlay is open
    Inventory,
    /// A final screen waits for any key
    Acknowledge,
}

/// Actions available while the inventory is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryIntent {
    CursorUp,
    CursorDown,
    UseOrEquip,
    Drop,
    Close,
}

/// A single discrete player decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Move(Direction),
    Attack,
    OpenInventory,
    Quit,
    Inventory(InventoryIntent),
    Acknowledge,
}

impl Intent {
    /// Map a typed character to an intent for the given mode.
    ///
    /// Shared by the terminal front-end and scripted runs so both speak the
    /// same key language.
    pub fn from_char(c: char, mode: InputMode) -> Option<Intent> {
        match mode {
            InputMode::Acknowledge => Some(Intent::Acknowledge),
            InputMode::Exploring => match c {
                'k' => Some(Intent::Move(Direction::Up)),
                'j' => Some(Intent::Move(Direction::Down)),
                'h' => Some(Intent::Move(Direction::Left)),
                'l' => Some(Intent::Move(Direction::Right)),
                'a' | '\n' | '\r' => Some(Intent::Attack),
                'e' | 'i' => Some(Intent::OpenInventory),
                'q' => Some(Intent::Quit),
                _ => None,
            },
            InputMode::Inventory => match c {
                'k' => Some(Intent::Inventory(InventoryIntent::CursorUp)),
                'j' => Some(Intent::Inventory(InventoryIntent::CursorDown)),
                'u' | '\n' | '\r' => Some(Intent::Inventory(InventoryIntent::UseOrEquip)),
                'd' => Some(Intent::Inventory(InventoryIntent::Drop)),
                'x' | 'e' | 'i' | '\u{1b}' => Some(Intent::Inventory(InventoryIntent::Close)),
                'q' => Some(Intent::Quit),
                _ => None,
            },
        }
    }
}
