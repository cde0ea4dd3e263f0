//! User Interface module
//!
//! Terminal front-end using ratatui and crossterm.

pub mod app;
pub mod input;

pub use app::App;
pub use input::{map_key, CrosstermInput};

use std::io::Stdout;

use ratatui::{backend::CrosstermBackend, Terminal};

use crate::game::{Renderer, Snapshot};

/// Renderer drawing through a ratatui terminal
pub struct TerminalRenderer<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<Stdout>>,
    app: App,
}

impl<'a> TerminalRenderer<'a> {
    pub fn new(terminal: &'a mut Terminal<CrosstermBackend<Stdout>>) -> Self {
        Self {
            terminal,
            app: App::new(),
        }
    }
}

impl Renderer for TerminalRenderer<'_> {
    fn render(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let app = &self.app;
        self.terminal.draw(|frame| app.render(frame, snapshot))?;
        Ok(())
    }
}
