//! Sport breakdown cards — the per-sport aggregation panels.
//!
//! Each card groups a set of provider activity-type strings under one label
//! and gradient. Cards are ordered by their `order` field, which the
//! migration engine keeps as a permutation of `0..n`.

use serde::{Deserialize, Serialize};

/// Two-stop CSS gradient for a card background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
  pub from: String,
  pub to:   String,
}

/// One sport card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportCard {
  /// Stable identifier, never shown to the user.
  pub id:                    String,
  pub label:                 String,
  pub icon:                  String,
  pub gradient:              Gradient,
  /// Provider activity-type strings this card aggregates.
  pub activity_types:        Vec<String>,
  pub enabled:               bool,
  pub order:                 u32,
  #[serde(default = "default_true")]
  pub include_in_stats:      bool,
  #[serde(default = "default_true")]
  pub include_in_highlights: bool,
}

/// The ordered list of sport cards shown in the breakdown section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportBreakdown {
  pub activities: Vec<SportCard>,
}

impl Default for SportBreakdown {
  fn default() -> Self { crate::defaults::sport_breakdown() }
}

fn default_true() -> bool { true }
