//! Integration tests for `SqliteSettings`, in-memory and on disk.

use chrono::Utc;
use recap_core::{
  CURRENT_VERSION,
  document::SettingsDocument,
  store::{PersistedSettings, SettingsPersistence, SettingsStore},
};
use serde_json::json;

use crate::SqliteSettings;

fn record(version: u32, state: serde_json::Value) -> PersistedSettings {
  PersistedSettings { version, state, updated_at: Utc::now() }
}

// ─── Round trips ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_returns_none_on_fresh_database() {
  let store = SqliteSettings::open_in_memory().await.unwrap();
  assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn save_then_load_round_trips() {
  let store = SqliteSettings::open_in_memory().await.unwrap();

  let saved = record(
    CURRENT_VERSION,
    serde_json::to_value(SettingsDocument::default()).unwrap(),
  );
  store.save(saved.clone()).await.unwrap();

  let loaded = store.load().await.unwrap().unwrap();
  assert_eq!(loaded, saved);
}

#[tokio::test]
async fn save_replaces_the_previous_record() {
  let store = SqliteSettings::open_in_memory().await.unwrap();

  store.save(record(2, json!({ "a": 1 }))).await.unwrap();
  store.save(record(3, json!({ "b": 2 }))).await.unwrap();

  let loaded = store.load().await.unwrap().unwrap();
  assert_eq!(loaded.version, 3);
  assert_eq!(loaded.state, json!({ "b": 2 }));
}

#[tokio::test]
async fn settings_survive_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("settings.db");

  let saved = record(CURRENT_VERSION, json!({ "yearInReview": {} }));
  {
    let store = SqliteSettings::open(&path).await.unwrap();
    store.save(saved.clone()).await.unwrap();
  }

  let reopened = SqliteSettings::open(&path).await.unwrap();
  let loaded = reopened.load().await.unwrap().unwrap();
  assert_eq!(loaded, saved);
}

// ─── Behind a SettingsStore ──────────────────────────────────────────────────

#[tokio::test]
async fn settings_store_migrates_a_stale_database() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("settings.db");

  {
    let backend = SqliteSettings::open(&path).await.unwrap();
    backend.save(record(0, json!({}))).await.unwrap();
  }

  let backend = SqliteSettings::open(&path).await.unwrap();
  let store = SettingsStore::open(backend).await.unwrap();
  assert_eq!(*store.document(), SettingsDocument::default());

  // The migrated document was written back under the current version.
  let check = SqliteSettings::open(&path).await.unwrap();
  let persisted = check.load().await.unwrap().unwrap();
  assert_eq!(persisted.version, CURRENT_VERSION);
}

#[tokio::test]
async fn mutations_survive_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("settings.db");

  {
    let backend = SqliteSettings::open(&path).await.unwrap();
    let mut store = SettingsStore::open(backend).await.unwrap();
    store.toggle_activity_type_excluded("Golf").await.unwrap();
  }

  let backend = SqliteSettings::open(&path).await.unwrap();
  let store = SettingsStore::open(backend).await.unwrap();
  assert_eq!(store.year_in_review().excluded_activity_types, ["Golf"]);
}
