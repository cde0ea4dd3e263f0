//! Front-end seams
//!
//! The turn driver talks to presentation through these two traits and
//! borrows both for the length of a run.

use super::intent::{InputMode, Intent};
use super::snapshot::Snapshot;

/// Draws a snapshot
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot) -> anyhow::Result<()>;
}

/// Produces the next player intent, blocking until one is available.
/// `Ok(None)` means the source is exhausted.
pub trait InputSource {
    fn next_intent(&mut self, mode: InputMode) -> anyhow::Result<Option<Intent>>;
}
