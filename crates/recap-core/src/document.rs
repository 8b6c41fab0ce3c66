//! The settings document — everything the host application persists.
//!
//! Field names serialise in camelCase because the persisted blob is shared
//! with the host web application's store. Every field carries a serde
//! default so partially-shaped documents still deserialise; the migration
//! engine is responsible for anything structural.

use serde::{Deserialize, Serialize};

use crate::{
  defaults,
  filter::ActivityTypeFilter,
  sport::SportBreakdown,
};

// ─── Background image ────────────────────────────────────────────────────────

/// Placement of the year-in-review background image, in percent of the
/// canvas plus a zoom factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImagePosition {
  pub x:     f64,
  pub y:     f64,
  pub scale: f64,
}

impl Default for BackgroundImagePosition {
  fn default() -> Self { Self { x: 50.0, y: 50.0, scale: 1.0 } }
}

// ─── Virtual-activity exclusions ─────────────────────────────────────────────

/// Per-sport flags for dropping trainer/treadmill activities from the
/// summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualExclusions {
  pub exclude_virtual_rides: bool,
  pub exclude_virtual_runs:  bool,
  pub exclude_virtual_rows:  bool,
}

// ─── Activity-type preferences ───────────────────────────────────────────────

/// Inclusion flags for one provider activity type. List position is the
/// display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTypePreference {
  pub activity_type:         String,
  pub include_in_stats:      bool,
  pub include_in_highlights: bool,
}

// ─── Special toggles ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialOptions {
  /// Highlight triathlon days (a swim, ride, and run on the same day).
  pub highlight_triathlon:  bool,
  /// Fold all cycling sub-types into one "Ride" row.
  pub merge_cycling_sports: bool,
}

impl Default for SpecialOptions {
  fn default() -> Self {
    Self { highlight_triathlon: true, merge_cycling_sports: false }
  }
}

// ─── Year in review ──────────────────────────────────────────────────────────

/// Display and filter preferences for the year-in-review summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearInReview {
  #[serde(default)]
  pub background_image:          Option<String>,
  #[serde(default)]
  pub background_image_position: BackgroundImagePosition,
  /// Provider activity types dropped from the summary entirely.
  #[serde(default)]
  pub excluded_activity_types:   Vec<String>,
  #[serde(default)]
  pub virtual_exclusions:        VirtualExclusions,
  /// Activities whose title contains one of these substrings are ignored.
  #[serde(default)]
  pub ignored_title_patterns:    Vec<String>,
  /// Keys of the highlight stats selected for the summary image.
  #[serde(default = "defaults::highlight_stats")]
  pub highlight_stats:           Vec<String>,
  #[serde(default = "defaults::activity_type_settings")]
  pub activity_type_settings:    Vec<ActivityTypePreference>,
  #[serde(default)]
  pub special_options:           SpecialOptions,
  /// At most one entry per activity type.
  #[serde(default = "defaults::activity_filters")]
  pub activity_filters:          Vec<ActivityTypeFilter>,
}

impl Default for YearInReview {
  fn default() -> Self { defaults::year_in_review() }
}

// ─── Document ────────────────────────────────────────────────────────────────

/// The complete persisted settings document at [`crate::CURRENT_VERSION`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDocument {
  #[serde(default)]
  pub year_in_review:  YearInReview,
  #[serde(default)]
  pub sport_breakdown: SportBreakdown,
}

impl Default for SettingsDocument {
  fn default() -> Self { defaults::document() }
}

impl SettingsDocument {
  /// Look up the filter entry for `activity_type`, if any.
  pub fn activity_filter(&self, activity_type: &str) -> Option<&ActivityTypeFilter> {
    self
      .year_in_review
      .activity_filters
      .iter()
      .find(|f| f.activity_type == activity_type)
  }
}
