use anyhow::{Context, Result, ensure};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

use gridsnake::game::{GameConfig, SnakeEngine};
use gridsnake::modes::PlayMode;

#[derive(Parser)]
#[command(name = "gridsnake")]
#[command(version, about = "Classic snake for the terminal")]
struct Cli {
    /// Board side length in cells
    #[arg(long, default_value = "20")]
    size: usize,

    /// Milliseconds between game steps
    #[arg(long, default_value = "130")]
    tick_ms: u64,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file instead of discarding them
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    ensure!(cli.size >= 4, "grid size must be at least 4");
    ensure!(cli.tick_ms >= 1, "tick interval must be at least 1ms");

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let config = GameConfig {
        grid_size: cli.size,
        tick_interval: Duration::from_millis(cli.tick_ms),
        ..GameConfig::default()
    };

    info!(
        size = config.grid_size,
        tick_ms = cli.tick_ms,
        seed = cli.seed,
        "starting session"
    );

    match cli.seed {
        Some(seed) => {
            let engine = SnakeEngine::with_rng(config, StdRng::seed_from_u64(seed));
            PlayMode::with_engine(engine).run().await
        }
        None => PlayMode::new(config).run().await,
    }
}

/// Raw mode owns the terminal, so logs go to a file or nowhere.
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
