//! Delve - Entry Point
//!
//! Parses arguments, sets up logging and the terminal, and hands a game to
//! the chosen front-end.

use std::fs::{File, OpenOptions};
use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use delve::game::{RecordingRenderer, ScriptedInput};
use delve::render::{is_kitty_supported, TileRenderer};
use delve::ui::{CrosstermInput, TerminalRenderer};
use delve::{Game, GameConfig, RunOutcome, TurnDriver};

/// Turn-based dungeon crawler
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Delve - descend twenty levels and live", long_about = None)]
struct Args {
    /// Draw the map with Kitty graphics sprites
    #[arg(short = 't', long = "tiles")]
    tiles: bool,

    /// RNG seed for a reproducible run
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Play headless from a key script and print the final state as JSON
    #[arg(long = "script")]
    script: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Log to file so the TUI is not disturbed
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("delve.log")
        .or_else(|_| File::create(std::env::temp_dir().join("delve.log")))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting Delve v{}", env!("CARGO_PKG_VERSION"));

    let mut game = Game::new(GameConfig::default(), args.seed)?;

    if let Some(script) = args.script {
        return run_script(&mut game, &script);
    }

    let tiles = if args.tiles && !is_kitty_supported() {
        log::warn!("Kitty graphics not detected, using the text front-end");
        false
    } else {
        args.tiles
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = if tiles {
        run_tiles(&mut game)
    } else {
        run_terminal(&mut game)
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;

    match result {
        Ok(outcome) => {
            log::info!("Delve shut down cleanly ({:?})", outcome);
            println!("{}", farewell(outcome, game.depth()));
            Ok(())
        }
        Err(e) => {
            log::error!("Game exited with error: {}", e);
            eprintln!("Error: {}", e);
            Err(e)
        }
    }
}

fn run_terminal(game: &mut Game) -> Result<RunOutcome> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    let mut renderer = TerminalRenderer::new(&mut terminal);
    let mut input = CrosstermInput::new();
    TurnDriver::new(game, &mut renderer, &mut input).run()
}

fn run_tiles(game: &mut Game) -> Result<RunOutcome> {
    let mut renderer = TileRenderer::new(io::stdout());
    let mut input = CrosstermInput::new();
    TurnDriver::new(game, &mut renderer, &mut input).run()
}

fn run_script(game: &mut Game, script: &str) -> Result<()> {
    let mut renderer = RecordingRenderer::new();
    let mut input = ScriptedInput::new(script);
    let outcome = TurnDriver::new(game, &mut renderer, &mut input).run()?;
    log::info!("Script finished with {:?} after {} frames", outcome, renderer.frames.len());
    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    Ok(())
}

fn farewell(outcome: RunOutcome, depth: u32) -> String {
    match outcome {
        RunOutcome::Won => "You escaped the dungeon. Well played!".to_string(),
        RunOutcome::Lost => format!("You died at depth {}.", depth),
        RunOutcome::Quit => format!("You left the dungeon at depth {}.", depth),
    }
}
