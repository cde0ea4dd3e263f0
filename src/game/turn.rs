//! Turn driver
//!
//! Blocks on one intent, resolves it, renders, repeats.

use super::frontend::{InputSource, Renderer};
use super::state::{Game, RunOutcome};

/// Runs a game against a renderer and an input source
pub struct TurnDriver<'a> {
    game: &'a mut Game,
    renderer: &'a mut dyn Renderer,
    input: &'a mut dyn InputSource,
}

impl<'a> TurnDriver<'a> {
    pub fn new(game: &'a mut Game, renderer: &'a mut dyn Renderer, input: &'a mut dyn InputSource) -> Self {
        Self { game, renderer, input }
    }

    /// Play until the run ends. Running out of input counts as quitting.
    pub fn run(&mut self) -> anyhow::Result<RunOutcome> {
        self.renderer.render(&self.game.snapshot())?;

        loop {
            if let Some(outcome) = self.game.outcome() {
                log::info!("Run ended: {:?} at depth {}", outcome, self.game.depth());
                return Ok(outcome);
            }

            let mode = self.game.input_mode();
            let Some(intent) = self.input.next_intent(mode)? else {
                log::info!("Input exhausted at depth {}", self.game.depth());
                return Ok(RunOutcome::Quit);
            };

            self.game.apply_intent(intent)?;
            self.renderer.render(&self.game.snapshot())?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::intent::{InputMode, Intent};
    use crate::game::snapshot::Snapshot;
    use std::collections::VecDeque;

    struct CountingRenderer {
        frames: usize,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, _snapshot: &Snapshot) -> anyhow::Result<()> {
            self.frames += 1;
            Ok(())
        }
    }

    struct QueuedInput(VecDeque<Intent>);

    impl InputSource for QueuedInput {
        fn next_intent(&mut self, _mode: InputMode) -> anyhow::Result<Option<Intent>> {
            Ok(self.0.pop_front())
        }
    }

    #[test]
    fn test_renders_once_per_intent_plus_initial() {
        let mut game = Game::new(GameConfig::default(), Some(3)).unwrap();
        let mut renderer = CountingRenderer { frames: 0 };
        let mut input = QueuedInput(VecDeque::from(vec![Intent::OpenInventory, Intent::Quit]));
        let outcome = TurnDriver::new(&mut game, &mut renderer, &mut input).run().unwrap();
        assert_eq!(outcome, RunOutcome::Quit);
        assert_eq!(renderer.frames, 3);
    }

    #[test]
    fn test_exhausted_input_quits() {
        let mut game = Game::new(GameConfig::default(), Some(3)).unwrap();
        let mut renderer = CountingRenderer { frames: 0 };
        let mut input = QueuedInput(VecDeque::new());
        let outcome = TurnDriver::new(&mut game, &mut renderer, &mut input).run().unwrap();
        assert_eq!(outcome, RunOutcome::Quit);
        assert_eq!(renderer.frames, 1);
    }
}
