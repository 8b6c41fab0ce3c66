//! Error types for `recap-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The persisted value is not a JSON object at all. Fatal at load; callers
  /// fall back to full defaults rather than attempting a partial migration.
  #[error("settings document is not a JSON object (found {found})")]
  MalformedSettings {
    /// JSON kind of the offending value, e.g. `"null"` or `"string"`.
    found: &'static str,
  },

  #[error("unknown sport card: {0}")]
  UnknownSport(String),

  #[error("sport reorder must name every card exactly once")]
  InvalidReorder,

  #[error("no filter entry for activity type {0:?}")]
  FilterNotFound(String),

  #[error("no distance filter {id:?} under activity type {activity_type:?}")]
  DistanceFilterNotFound {
    activity_type: String,
    id:            String,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
