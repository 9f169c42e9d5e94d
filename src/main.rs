// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! Play Rush Hour in the terminal.
//!
//! ```bash
//! rush-hour layout.json
//! RUST_LOG=rush_hour=debug rush-hour layout.json --rows 6 --columns 6 --exit-row 2
//! rush-hour layout.json --config board.json --target Y
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rush_hour::config::{self, GameConfig};
use rush_hour::game::Game;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Play Rush Hour in the terminal
#[derive(Parser, Debug)]
#[command(name = "rush-hour", version, about, long_about = None)]
struct Cli {
    /// JSON layout mapping vehicle names to `[length, [row, column], orientation]`
    layout: PathBuf,

    /// JSON board configuration; the flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of rows of the board [default: 7]
    #[arg(long)]
    rows: Option<u8>,

    /// Number of columns of the board [default: 7]
    #[arg(long)]
    columns: Option<u8>,

    /// Row whose right edge holds the exit [default: 3]
    #[arg(long)]
    exit_row: Option<u8>,

    /// Vehicle which must reach the exit [default: R]
    #[arg(long)]
    target: Option<char>,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = "warn")]
    log: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log)?;

    let config = cli.config()?;

    let mut state = config.state()?;
    let vehicles = config::load_layout(&cli.layout, &config)
        .with_context(|| format!("failed to load layout {}", cli.layout.display()))?;
    let mut board = state.board_mut()?;
    let admitted = config::admit_all(&mut board, vehicles);
    tracing::info!(admitted, "vehicles placed");

    let outcome = Game::new(board, config.alphabet.as_str(), io::stdin().lock(), io::stdout())
        .play()
        .context("terminal I/O failed")?;
    tracing::info!(?outcome, "session finished");

    Ok(())
}

impl Cli {
    /// The configuration file (or the defaults), overridden by the command line flags.
    fn config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => GameConfig::default(),
        };
        config.rows = self.rows.unwrap_or(config.rows);
        config.columns = self.columns.unwrap_or(config.columns);
        config.exit_row = self.exit_row.unwrap_or(config.exit_row);
        config.target = self.target.unwrap_or(config.target);
        config.validate()?;
        Ok(config)
    }
}

/// Setup logging to stderr, keeping stdout for the game itself.
fn setup_logging(default_filter: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .context("invalid log filter")?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .context("failed to install the log subscriber")?;

    Ok(())
}
