//! Literal default tables for new documents and for migration steps.
//!
//! Each distance-bucket table exists once, under a versioned name, and is
//! referenced from both the current-document defaults and the migration step
//! that introduced it. Historical tables are kept verbatim so replaying an
//! old document reproduces exactly what those releases wrote.

use crate::{
  document::{
    ActivityTypePreference, SettingsDocument, SpecialOptions, YearInReview,
  },
  filter::{
    ActivityTypeFilter, DistanceFilter, DistanceOperator, DistanceUnit,
  },
  sport::{Gradient, SportBreakdown, SportCard},
};

// ─── Document ────────────────────────────────────────────────────────────────

/// A complete default document at the current schema version.
pub fn document() -> SettingsDocument {
  SettingsDocument {
    year_in_review:  year_in_review(),
    sport_breakdown: sport_breakdown(),
  }
}

pub fn year_in_review() -> YearInReview {
  YearInReview {
    background_image:          None,
    background_image_position: Default::default(),
    excluded_activity_types:   Vec::new(),
    virtual_exclusions:        Default::default(),
    ignored_title_patterns:    Vec::new(),
    highlight_stats:           highlight_stats(),
    activity_type_settings:    activity_type_settings(),
    special_options:           SpecialOptions::default(),
    activity_filters:          activity_filters(),
  }
}

/// Highlight stat keys pre-selected for the summary image.
pub fn highlight_stats() -> Vec<String> {
  [
    "totalDistance",
    "totalDuration",
    "totalElevationGain",
    "activeDays",
    "longestActivity",
    "biggestClimb",
  ]
  .map(String::from)
  .to_vec()
}

// ─── Activity-type preferences ───────────────────────────────────────────────

/// Default display order and inclusion flags per provider activity type.
/// Gym work stays out of the highlights reel by default.
pub fn activity_type_settings() -> Vec<ActivityTypePreference> {
  fn pref(activity_type: &str, include_in_highlights: bool) -> ActivityTypePreference {
    ActivityTypePreference {
      activity_type: activity_type.to_owned(),
      include_in_stats: true,
      include_in_highlights,
    }
  }

  vec![
    pref("Run", true),
    pref("TrailRun", true),
    pref("VirtualRun", true),
    pref("Ride", true),
    pref("GravelRide", true),
    pref("MountainBikeRide", true),
    pref("VirtualRide", true),
    pref("Swim", true),
    pref("Hike", true),
    pref("Walk", true),
    pref("AlpineSki", true),
    pref("NordicSki", true),
    pref("Kayaking", true),
    pref("Rowing", true),
    pref("WeightTraining", false),
    pref("Workout", false),
    pref("Yoga", false),
  ]
}

// ─── Sport breakdown ─────────────────────────────────────────────────────────

/// The eight default sport cards, ordered 0..=7.
pub fn sport_breakdown() -> SportBreakdown {
  fn card(
    order: u32,
    id: &str,
    label: &str,
    icon: &str,
    gradient: (&str, &str),
    activity_types: &[&str],
  ) -> SportCard {
    SportCard {
      id: id.to_owned(),
      label: label.to_owned(),
      icon: icon.to_owned(),
      gradient: Gradient {
        from: gradient.0.to_owned(),
        to:   gradient.1.to_owned(),
      },
      activity_types: activity_types.iter().map(|t| (*t).to_owned()).collect(),
      enabled: true,
      order,
      include_in_stats: true,
      include_in_highlights: true,
    }
  }

  SportBreakdown {
    activities: vec![
      card(0, "run", "Running", "🏃", ("#f97316", "#ef4444"), &[
        "Run",
        "TrailRun",
        "VirtualRun",
      ]),
      card(1, "ride", "Cycling", "🚴", ("#22c55e", "#14b8a6"), &[
        "Ride",
        "GravelRide",
        "MountainBikeRide",
        "VirtualRide",
        "EBikeRide",
      ]),
      card(2, "swim", "Swimming", "🏊", ("#3b82f6", "#06b6d4"), &["Swim"]),
      card(3, "hike", "Hiking", "🥾", ("#84cc16", "#22c55e"), &["Hike"]),
      card(4, "walk", "Walking", "🚶", ("#a855f7", "#6366f1"), &["Walk"]),
      card(5, "winter", "Winter sports", "⛷️", ("#0ea5e9", "#38bdf8"), &[
        "AlpineSki",
        "BackcountrySki",
        "NordicSki",
        "Snowboard",
        "Snowshoe",
      ]),
      card(6, "water", "Water sports", "🚣", ("#06b6d4", "#0891b2"), &[
        "Kayaking",
        "Canoeing",
        "Rowing",
        "StandUpPaddling",
        "Surfing",
      ]),
      card(7, "strength", "Strength & fitness", "🏋️", ("#f43f5e", "#ec4899"), &[
        "WeightTraining",
        "Workout",
        "Crossfit",
        "Yoga",
        "Pilates",
      ]),
    ],
  }
}

// ─── Distance-bucket tables ──────────────────────────────────────────────────

fn bucket(
  id: &str,
  operator: DistanceOperator,
  value: f64,
  unit: DistanceUnit,
) -> DistanceFilter {
  DistanceFilter { id: id.to_owned(), operator, value, unit }
}

fn entry(activity_type: &str, distance_filters: Vec<DistanceFilter>) -> ActivityTypeFilter {
  ActivityTypeFilter {
    activity_type: activity_type.to_owned(),
    distance_filters,
    title_patterns: Vec::new(),
  }
}

/// Current (v5) distance-bucket defaults: one entry per default activity
/// type, each with at least one bucket.
pub fn activity_filters() -> Vec<ActivityTypeFilter> {
  use DistanceOperator::{Around, Gte};
  use DistanceUnit::{Km, Mi};

  vec![
    entry("Run", vec![
      bucket("run-5k", Around, 5.0, Km),
      bucket("run-10k", Around, 10.0, Km),
      bucket("run-half-marathon", Around, 21.1, Km),
      bucket("run-marathon", Around, 42.2, Km),
      bucket("run-ultra", Gte, 50.0, Km),
    ]),
    entry("Ride", vec![
      bucket("ride-40k", Around, 40.0, Km),
      bucket("ride-century-km", Gte, 100.0, Km),
      bucket("ride-century-mi", Gte, 100.0, Mi),
      bucket("ride-double-century", Gte, 200.0, Km),
    ]),
    entry("VirtualRide", vec![
      bucket("virtual-ride-40k", Around, 40.0, Km),
      bucket("virtual-ride-century-km", Gte, 100.0, Km),
    ]),
    entry("Swim", vec![
      bucket("swim-1k", Around, 1.0, Km),
      bucket("swim-ironman", Around, 3.8, Km),
    ]),
  ]
}

/// Historical table attached by the step targeting schema version 4. The
/// bucket values changed in the following release; the step that introduced
/// them must keep writing exactly these.
pub fn activity_filters_v4() -> Vec<ActivityTypeFilter> {
  use DistanceOperator::{Around, Gte};
  use DistanceUnit::{Km, Mi};

  vec![
    entry("Run", vec![
      bucket("run-5k", Around, 5.0, Km),
      bucket("run-10k", Around, 10.0, Km),
      bucket("run-half-marathon", Around, 21.1, Km),
      bucket("run-marathon", Around, 42.2, Km),
    ]),
    entry("Ride", vec![
      bucket("ride-40k", Around, 40.0, Km),
      bucket("ride-century-km", Gte, 100.0, Km),
      bucket("ride-century-mi", Gte, 100.0, Mi),
    ]),
    entry("VirtualRide", vec![
      bucket("virtual-ride-40k", Around, 40.0, Km),
      bucket("virtual-ride-century-km", Gte, 100.0, Km),
    ]),
    entry("Swim", vec![
      bucket("swim-1k", Around, 1.0, Km),
      bucket("swim-2k", Around, 2.0, Km),
    ]),
  ]
}
