//! `recap` — inspect and maintain a recap settings database.
//!
//! # Usage
//!
//! ```
//! recap status
//! recap show
//! recap migrate
//! recap reset --yes
//! recap --db ./settings.db status
//! ```
//!
//! The database path resolves from `--db`, then `RECAP_DB_PATH`, then the
//! `db_path` key of the config file (`recap.toml` in the working directory
//! by default), then a per-user default.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use recap_core::{
  CURRENT_VERSION,
  store::{SettingsPersistence, SettingsStore},
};
use recap_store_sqlite::SqliteSettings;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "recap", about = "Recap settings database tool")]
struct Cli {
  /// Path to the settings database (overrides config and environment).
  #[arg(long, value_name = "FILE")]
  db: Option<PathBuf>,

  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "recap.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the stored schema version and whether migration is needed.
  Status,
  /// Print the settings document as pretty JSON, migrating it if behind.
  Show,
  /// Migrate the database to the current schema version.
  Migrate,
  /// Replace the stored document with full defaults.
  Reset {
    /// Skip the confirmation check.
    #[arg(long)]
    yes: bool,
  },
}

// ─── Config file ─────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file; everything also settable via
/// `RECAP_`-prefixed environment variables.
#[derive(Deserialize, Default)]
struct FileConfig {
  db_path: Option<PathBuf>,
}

fn resolve_db_path(cli_db: Option<PathBuf>, config_path: &Path) -> anyhow::Result<PathBuf> {
  if let Some(path) = cli_db {
    return Ok(expand_tilde(&path));
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(config_path.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("RECAP"))
    .build()
    .context("failed to read config")?;

  let file_cfg: FileConfig = settings
    .try_deserialize()
    .context("failed to deserialise config")?;

  Ok(match file_cfg.db_path {
    Some(path) => expand_tilde(&path),
    None => expand_tilde(Path::new("~/.local/share/recap/settings.db")),
  })
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

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let db_path = resolve_db_path(cli.db, &cli.config)?;

  if let Some(parent) = db_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let backend = SqliteSettings::open(&db_path)
    .await
    .with_context(|| format!("failed to open database at {}", db_path.display()))?;

  match cli.command {
    Command::Status => status(&backend).await,
    Command::Show => show(backend).await,
    Command::Migrate => migrate(backend).await,
    Command::Reset { yes } => reset(backend, yes).await,
  }
}

// ─── Commands ────────────────────────────────────────────────────────────────

/// Report the stored version without touching the document.
async fn status(backend: &SqliteSettings) -> anyhow::Result<()> {
  match backend.load().await.context("failed to load settings")? {
    None => println!("no settings stored yet (current schema version: {CURRENT_VERSION})"),
    Some(record) => {
      println!("stored schema version:  {}", record.version);
      println!("current schema version: {CURRENT_VERSION}");
      if record.version < CURRENT_VERSION {
        println!("migration needed — run `recap migrate`");
      } else {
        println!("up to date");
      }
    }
  }
  Ok(())
}

/// Open the store (migrating if behind) and pretty-print the document.
async fn show(backend: SqliteSettings) -> anyhow::Result<()> {
  let store = SettingsStore::open(backend)
    .await
    .context("failed to open settings store")?;
  let rendered = serde_json::to_string_pretty(store.document())
    .context("failed to render settings")?;
  println!("{rendered}");
  Ok(())
}

/// Open the store and report the version transition it performed.
async fn migrate(backend: SqliteSettings) -> anyhow::Result<()> {
  let stored_version = backend
    .load()
    .await
    .context("failed to load settings")?
    .map(|record| record.version);

  SettingsStore::open(backend)
    .await
    .context("failed to migrate settings")?;

  match stored_version {
    None => println!("no settings were stored; wrote defaults at version {CURRENT_VERSION}"),
    Some(v) if v < CURRENT_VERSION => {
      println!("migrated settings from version {v} to {CURRENT_VERSION}");
    }
    Some(v) => println!("already at version {v}; nothing to do"),
  }
  Ok(())
}

/// Replace the stored document with full defaults.
async fn reset(backend: SqliteSettings, yes: bool) -> anyhow::Result<()> {
  if !yes {
    bail!("refusing to reset without --yes");
  }
  let mut store = SettingsStore::open(backend)
    .await
    .context("failed to open settings store")?;
  store
    .reset_to_defaults()
    .await
    .context("failed to reset settings")?;
  println!("settings reset to defaults at version {CURRENT_VERSION}");
  Ok(())
}
