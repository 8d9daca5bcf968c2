// SPDX-License-Identifier: MIT
//
// lumo — a terminal gradient studio.
//
// This binary wires the workspace crates to the terminal:
//
//   lumo-color → HSL/RGB conversion and contrast math
//   lumo-core  → gradients, history, favorites, persistence, session
//
// Each keypress flows through:
//
//   stdin → reader thread → parser → App::handle_key → session mutation
//   App::render → full frame string → one stdout write
//
// The loop is tick-driven: `recv_timeout` wakes every 50ms to expire
// toasts and to resolve a pending lone ESC in the input parser.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser as _;
use lumo_core::{
    Session, SessionConfig, StateStore, Theme, history::DEFAULT_CAPACITY,
    session::DEFAULT_SET_SIZE,
};

mod app;
mod clipboard;
mod export;
mod input;
mod term;

use app::App;
use input::{Parser, StdinReader};
use term::Terminal;

/// How often the loop wakes with no input pending.
const TICK: Duration = Duration::from_millis(50);

#[derive(Debug, clap::Parser)]
#[command(name = "lumo", version, about = "Generate, curate, and export color gradients")]
struct Cli {
    /// Gradients per set.
    #[arg(long, default_value_t = DEFAULT_SET_SIZE)]
    set_size: usize,

    /// History snapshots to keep.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Fixed RNG seed for reproducible sets.
    #[arg(long)]
    seed: Option<u64>,

    /// State file path (default: $XDG_STATE_HOME/lumo/state.json).
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Start with this theme instead of the saved one.
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,

    /// Directory PNG exports are written to.
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,
}

fn parse_theme(raw: &str) -> Result<Theme, String> {
    Theme::from_name(raw).ok_or_else(|| format!("unknown theme {raw:?} (sunset, ocean, neon)"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging goes to stderr; redirect it when debugging so it doesn't
    // fight the alternate screen: RUST_LOG=debug lumo 2>lumo.log
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let store = cli
        .state_file
        .map_or_else(StateStore::default_location, StateStore::at);
    log::debug!("state file: {}", store.path().display());

    let session = Session::start(
        store,
        &SessionConfig {
            set_size: cli.set_size,
            capacity: cli.capacity,
            seed: cli.seed,
            theme: cli.theme,
        },
    );

    let mut terminal = Terminal::new().context("lumo needs an interactive terminal")?;
    terminal.enter().context("entering raw mode")?;
    let result = run(&mut terminal, App::new(session, cli.export_dir));
    terminal.leave().context("restoring the terminal")?;
    result
}

fn run(terminal: &mut Terminal, mut app: App) -> anyhow::Result<()> {
    let (mut reader, events) = StdinReader::spawn();
    let mut parser = Parser::new();
    let mut quit = false;

    {
        let mut out = io::stdout().lock();

        while !quit {
            if app.dirty() {
                let frame = app.render(terminal.refresh_size());
                out.write_all(frame.as_bytes())?;
                out.flush()?;
            }

            match events.recv_timeout(TICK) {
                Ok(bytes) => {
                    for key in parser.advance(&bytes) {
                        if app.handle_key(key) {
                            quit = true;
                            break;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    for key in parser.flush() {
                        if app.handle_key(key) {
                            quit = true;
                            break;
                        }
                    }
                    app.tick(Instant::now());
                }
                Err(RecvTimeoutError::Disconnected) => quit = true,
            }
        }
    }

    app.shutdown();
    reader.stop();
    Ok(())
}
