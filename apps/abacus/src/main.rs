//! abacus - Terminal calculator backed by a remote math evaluation service.

use std::fs;

use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use abacus::cli::Cli;
use abacus::config::{Config, LoggingConfig};
use abacus::session::Session;
use abacus::{tui, Context as _, Result, APP_NAME, APP_VERSION};
use abacus_api::ApiClient;
use abacus_core::{AngleUnit, Mode};
use abacus_history::{FileStore, History, KvStore, MemoryStore};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{} {err:?}", "ERROR".red());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    config.apply_cli(&cli);

    init_logging(&config.logging)?;
    info!("Starting {} v{}", APP_NAME, APP_VERSION);
    info!("Evaluation service: {}", config.api.url);

    let client = ApiClient::with_timeout(config.api.url.clone(), config.timeout())?;

    let result = if cli.ephemeral {
        run_with_store(MemoryStore::new(), client, &cli).await
    } else {
        if let Some(parent) = config.history.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create history directory {}", parent.display())
                })?;
            }
        }
        run_with_store(FileStore::new(&config.history.path), client, &cli).await
    };

    info!("{} stopped", APP_NAME);
    result
}

async fn run_with_store<S: KvStore>(store: S, client: ApiClient, cli: &Cli) -> Result<()> {
    let mut session = Session::new(client, History::load(store));
    if cli.scientific {
        session.calculator_mut().set_mode(Mode::Scientific);
    }
    if cli.radians {
        session.calculator_mut().set_angle_unit(AngleUnit::Radians);
    }
    tui::run(session).await
}

/// Route log output to a daily-rotated file; the TUI owns the terminal.
///
/// `RUST_LOG` overrides the configured level.
fn init_logging(config: &LoggingConfig) -> Result<()> {
    fs::create_dir_all(&config.dir)
        .with_context(|| format!("Failed to create log directory {}", config.dir.display()))?;

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone());
    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, &config.dir, format!("{APP_NAME}.log"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .init();
    Ok(())
}
