//! Headless front-end
//!
//! Plays a game from a key script and keeps the snapshots it was shown.
//! Used by `--script` and by the integration tests.

use std::collections::VecDeque;

use super::frontend::{InputSource, Renderer};
use super::intent::{InputMode, Intent};
use super::snapshot::Snapshot;

/// Feeds intents from a string, one character per key press. Characters
/// with no meaning in the current mode are skipped.
pub struct ScriptedInput {
    keys: VecDeque<char>,
}

impl ScriptedInput {
    pub fn new(script: &str) -> Self {
        Self {
            keys: script.chars().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_intent(&mut self, mode: InputMode) -> anyhow::Result<Option<Intent>> {
        while let Some(c) = self.keys.pop_front() {
            if let Some(intent) = Intent::from_char(c, mode) {
                return Ok(Some(intent));
            }
            log::trace!("Skipping script key {:?} in {:?} mode", c, mode);
        }
        Ok(None)
    }
}

/// Remembers every frame it is asked to draw
#[derive(Default)]
pub struct RecordingRenderer {
    pub frames: Vec<Snapshot>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.frames.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        self.frames.push(snapshot.clone());
        Ok(())
    }
}
