//! Activity filter types — distance buckets and title patterns.
//!
//! Filters classify or exclude individual activities elsewhere in the host
//! application; this crate only stores them. A document carries at most one
//! [`ActivityTypeFilter`] per provider activity type.

use serde::{Deserialize, Serialize};

// ─── Distance predicates ─────────────────────────────────────────────────────

/// Comparison applied to an activity's distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceOperator {
  Gt,
  Lt,
  Eq,
  Gte,
  Lte,
  /// Within the bucket's tolerance of `value` — "about 10 km".
  #[serde(rename = "±")]
  Around,
  /// Legacy spelling of `eq`; still present in old persisted documents.
  #[serde(rename = "=")]
  Exactly,
}

/// Unit the filter's `value` is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
  Km,
  Mi,
}

/// A single distance bucket. `id` is unique within its parent
/// [`ActivityTypeFilter`]; default buckets use stable literal ids, user-added
/// buckets get a UUID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceFilter {
  pub id:       String,
  pub operator: DistanceOperator,
  pub value:    f64,
  pub unit:     DistanceUnit,
}

// ─── Per-activity-type filter entry ──────────────────────────────────────────

/// All filters the user holds for one provider activity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTypeFilter {
  pub activity_type:    String,
  #[serde(default)]
  pub distance_filters: Vec<DistanceFilter>,
  /// Substring patterns matched against activity titles.
  #[serde(default)]
  pub title_patterns:   Vec<String>,
}

impl ActivityTypeFilter {
  /// An entry with no predicates for `activity_type`.
  pub fn empty(activity_type: impl Into<String>) -> Self {
    Self {
      activity_type:    activity_type.into(),
      distance_filters: Vec::new(),
      title_patterns:   Vec::new(),
    }
  }
}
