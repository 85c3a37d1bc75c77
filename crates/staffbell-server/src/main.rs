//! `staffbell` server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, starts the daily scan scheduler and serves the JSON API.
//!
//! # One-off passes
//!
//! ```text
//! staffbell --run-once --today 2025-09-10
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use staffbell_core::scan::Scanner;
use staffbell_server::{
  ServerConfig, ensure_admin,
  scheduler::{Scheduler, parse_timezone},
};
use staffbell_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Staffbell HR notification server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Run a single scan pass and exit instead of serving.
  #[arg(long)]
  run_once: bool,

  /// Date to scan with `--run-once` (defaults to today in the configured
  /// timezone).
  #[arg(long, value_name = "YYYY-MM-DD", requires = "run_once")]
  today: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("STAFFBELL").separator("__"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let timezone = parse_timezone(&server_cfg.schedule.timezone)?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if let Some(admin) = &server_cfg.bootstrap_admin {
    ensure_admin(&store, admin)
      .await
      .context("failed to create default administrator")?;
  }

  let scanner = Arc::new(Scanner::new(Arc::new(store)));

  if cli.run_once {
    let today = cli
      .today
      .unwrap_or_else(|| Utc::now().with_timezone(&timezone).date_naive());
    let report = scanner.run(today).await.context("scan pass failed")?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  if server_cfg.schedule.run_on_startup {
    let today = Utc::now().with_timezone(&timezone).date_naive();
    if let Err(e) = scanner.run(today).await {
      tracing::error!(%today, error = %e, "startup scan pass failed");
    }
  }

  if server_cfg.schedule.enabled {
    let scheduler = Scheduler::new(scanner.clone(), &server_cfg.schedule)?;
    tokio::spawn(scheduler.run());
    tracing::info!(
      cron = %server_cfg.schedule.cron,
      timezone = %timezone,
      "scan scheduler started"
    );
  } else {
    tracing::warn!("scan scheduler disabled by configuration");
  }

  let app = staffbell_server::app(scanner, timezone);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
