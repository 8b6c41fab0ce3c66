//! [`SqliteSettings`] — the SQLite implementation of
//! [`SettingsPersistence`].

use std::path::Path;

use chrono::{DateTime, Utc};
use recap_core::store::{PersistedSettings, SettingsPersistence};
use rusqlite::OptionalExtension as _;

use crate::{Error, Result, schema::SCHEMA};

// ─── Column codecs ───────────────────────────────────────────────────────────

fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// The settings record persisted in a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteSettings {
  conn: tokio_rusqlite::Connection,
}

impl SqliteSettings {
  /// Open (or create) a database at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory database — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Raw strings read directly from the single `settings` row.
struct RawRecord {
  version:    i64,
  state_json: String,
  updated_at: String,
}

impl SettingsPersistence for SqliteSettings {
  type Error = Error;

  async fn load(&self) -> Result<Option<PersistedSettings>> {
    let raw: Option<RawRecord> = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              "SELECT version, state_json, updated_at FROM settings WHERE id = 1",
              [],
              |row| {
                Ok(RawRecord {
                  version:    row.get(0)?,
                  state_json: row.get(1)?,
                  updated_at: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .map(|r| {
        Ok(PersistedSettings {
          version:    r.version as u32,
          state:      serde_json::from_str(&r.state_json)?,
          updated_at: decode_dt(&r.updated_at)?,
        })
      })
      .transpose()
  }

  async fn save(&self, record: PersistedSettings) -> Result<()> {
    let version = record.version as i64;
    let state_json = record.state.to_string();
    let updated_at = encode_dt(record.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO settings (id, version, state_json, updated_at)
           VALUES (1, ?1, ?2, ?3)
           ON CONFLICT(id) DO UPDATE SET
             version    = excluded.version,
             state_json = excluded.state_json,
             updated_at = excluded.updated_at",
          rusqlite::params![version, state_json, updated_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
