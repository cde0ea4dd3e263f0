//! Game module - Core game logic and state management

mod state;
mod turn;
mod intent;
mod snapshot;
mod frontend;
pub mod scripted;

pub use state::{Game, GameMessage, MessageCategory, RunOutcome, TurnPhase};
pub use turn::TurnDriver;
pub use intent::{InputMode, Intent, InventoryIntent};
pub use snapshot::{InventoryEntry, InventoryView, MessageView, MonsterView, PlayerView, Snapshot};
pub use frontend::{InputSource, Renderer};
pub use scripted::{RecordingRenderer, ScriptedInput};
