//! Keyboard input
//!
//! Turns crossterm key events into intents for the current input mode.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Direction;
use crate::game::{InputMode, InputSource, Intent, InventoryIntent};

/// Map a key press to an intent. Unbound keys yield `None`.
pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Intent::Quit);
    }

    match mode {
        InputMode::Acknowledge => Some(Intent::Acknowledge),
        InputMode::Exploring => match key.code {
            KeyCode::Up => Some(Intent::Move(Direction::Up)),
            KeyCode::Down => Some(Intent::Move(Direction::Down)),
            KeyCode::Left => Some(Intent::Move(Direction::Left)),
            KeyCode::Right => Some(Intent::Move(Direction::Right)),
            KeyCode::Enter => Some(Intent::Attack),
            KeyCode::Char(c) => Intent::from_char(c.to_ascii_lowercase(), mode),
            _ => None,
        },
        InputMode::Inventory => match key.code {
            KeyCode::Up => Some(Intent::Inventory(InventoryIntent::CursorUp)),
            KeyCode::Down => Some(Intent::Inventory(InventoryIntent::CursorDown)),
            KeyCode::Enter => Some(Intent::Inventory(InventoryIntent::UseOrEquip)),
            KeyCode::Esc => Some(Intent::Inventory(InventoryIntent::Close)),
            KeyCode::Char(c) => Intent::from_char(c.to_ascii_lowercase(), mode),
            _ => None,
        },
    }
}

/// Blocking keyboard reader
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl CrosstermInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for CrosstermInput {
    fn next_intent(&mut self, mode: InputMode) -> anyhow::Result<Option<Intent>> {
        loop {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not releases
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(intent) = map_key(key, mode) {
                    return Ok(Some(intent));
                }
                log::trace!("Unbound key {:?} in {:?} mode", key.code, mode);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_and_vi_keys_move() {
        assert_eq!(map_key(press(KeyCode::Up), InputMode::Exploring), Some(Intent::Move(Direction::Up)));
        assert_eq!(
            map_key(press(KeyCode::Char('h')), InputMode::Exploring),
            Some(Intent::Move(Direction::Left))
        );
    }

    #[test]
    fn test_enter_depends_on_mode() {
        assert_eq!(map_key(press(KeyCode::Enter), InputMode::Exploring), Some(Intent::Attack));
        assert_eq!(
            map_key(press(KeyCode::Enter), InputMode::Inventory),
            Some(Intent::Inventory(InventoryIntent::UseOrEquip))
        );
    }

    #[test]
    fn test_escape_closes_inventory_only() {
        assert_eq!(
            map_key(press(KeyCode::Esc), InputMode::Inventory),
            Some(Intent::Inventory(InventoryIntent::Close))
        );
        assert_eq!(map_key(press(KeyCode::Esc), InputMode::Exploring), None);
    }

    #[test]
    fn test_any_key_acknowledges() {
        assert_eq!(map_key(press(KeyCode::Tab), InputMode::Acknowledge), Some(Intent::Acknowledge));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key, InputMode::Inventory), Some(Intent::Quit));
    }
}
