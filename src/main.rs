use anyhow::{Context, Result};
use campusfeed::config::Config;
use campusfeed::engine::{EngineEvent, FeedEngine};
use campusfeed::feed::CategoryFilter;
use campusfeed::theme::ThemeVariant;
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

mod app;
mod ui;

use app::App;

/// Get the config directory path (~/.config/campusfeed/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("campusfeed"))
}

#[derive(Parser, Debug)]
#[command(name = "campusfeed", about = "Simulated campus news feed in the terminal")]
struct Args {
    /// Path to config file (default: ~/.config/campusfeed/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start on this category: All, Tech, Campus or Sports
    #[arg(long, value_name = "CATEGORY")]
    category: Option<CategoryFilter>,

    /// Print generated items to stdout instead of starting the TUI
    #[arg(long)]
    headless: bool,

    /// Number of items to print in headless mode
    #[arg(long, default_value_t = 5, requires = "headless")]
    count: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the TUI or headless output.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let mut settings = config
        .engine_settings()
        .context("Invalid configuration")?;
    if let Some(category) = args.category {
        settings.initial_category = category;
    }

    let theme = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "Unknown theme, falling back to dark");
        ThemeVariant::Dark
    });

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<EngineEvent>(32);
    let mut engine = FeedEngine::new(settings, event_tx);
    engine.start();

    if args.headless {
        return run_headless(engine, event_rx, args.count).await;
    }

    let mut app = App::new(engine, theme);
    ui::run(&mut app, event_rx).await?;

    println!("Read {} articles. Goodbye!", app.snapshot.read_count);
    Ok(())
}

/// Print the first `count` items that pass the filter, one per line.
async fn run_headless(
    mut engine: FeedEngine,
    mut event_rx: mpsc::Receiver<EngineEvent>,
    count: usize,
) -> Result<()> {
    let mut stdout = std::io::stdout();
    campusfeed::headless::run(&mut engine, &mut event_rx, count, &mut stdout)
        .await
        .context("Failed to write headless output")?;
    engine.shutdown();
    Ok(())
}
