//! SQL schema for the recap SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The application owns exactly one settings record, so the table is pinned
/// to a single row. Schema versioning of the *document* lives inside the
/// record itself (`version` column); `PRAGMA user_version` only tracks this
/// table's DDL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS settings (
    id          INTEGER PRIMARY KEY CHECK (id = 1),
    version     INTEGER NOT NULL,    -- document schema version
    state_json  TEXT NOT NULL,       -- JSON SettingsDocument
    updated_at  TEXT NOT NULL        -- ISO 8601 UTC; set by the store
);

PRAGMA user_version = 1;
";
