//! Versioned migration of persisted settings documents.
//!
//! A stored document is tagged with the schema version it was written at.
//! [`migrate`] folds a fixed, ordered list of upgrade steps over the raw JSON
//! map: a step is applied iff the stored version is below the step's target.
//! Steps read only document contents, never the version, and default anything
//! absent, so each one is individually idempotent and a document that is
//! several versions behind gets every intermediate step exactly once.
//!
//! Adding a schema version is a pure addition: append one step to [`STEPS`]
//! and bump [`CURRENT_VERSION`].

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
  defaults,
  document::SettingsDocument,
  error::{Error, Result},
};

/// Schema version this build reads and writes.
pub const CURRENT_VERSION: u32 = 5;

// ─── Step table ──────────────────────────────────────────────────────────────

struct Step {
  /// The schema version this step upgrades the document to.
  target: u32,
  name:   &'static str,
  apply:  fn(&mut Map<String, Value>) -> Result<()>,
}

const STEPS: &[Step] = &[
  Step {
    target: 2,
    name:   "attach-sport-breakdown",
    apply:  attach_sport_breakdown,
  },
  Step {
    target: 3,
    name:   "attach-background-position",
    apply:  attach_background_position,
  },
  Step {
    target: 4,
    name:   "attach-activity-preferences",
    apply:  attach_activity_preferences,
  },
  Step {
    target: 5,
    name:   "refresh-distance-defaults",
    apply:  refresh_distance_defaults,
  },
];

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Bring a persisted document up to [`CURRENT_VERSION`].
///
/// Pure: reads and writes no persistence; the caller owns the
/// load-then-migrate-then-save sequence. A document already at (or beyond)
/// the current version is passed through untouched. Missing fields are never
/// an error — only a value that is not a JSON object at all is rejected.
pub fn migrate(raw: Value, stored_version: u32) -> Result<SettingsDocument> {
  let mut doc = match raw {
    Value::Object(map) => map,
    other => {
      return Err(Error::MalformedSettings { found: json_kind(&other) });
    }
  };

  if stored_version >= CURRENT_VERSION {
    if stored_version > CURRENT_VERSION {
      // Forward compatibility is not guaranteed; accept and hope the shape
      // still deserialises.
      warn!(
        stored_version,
        current = CURRENT_VERSION,
        "stored settings are newer than this build; passing through"
      );
    }
    return Ok(serde_json::from_value(Value::Object(doc))?);
  }

  for step in STEPS {
    if stored_version < step.target {
      debug!(step = step.name, target = step.target, "applying settings upgrade step");
      (step.apply)(&mut doc)?;
    }
  }

  let mut document: SettingsDocument = serde_json::from_value(Value::Object(doc))?;
  enforce_invariants(&mut document);
  Ok(document)
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

// ─── Steps ───────────────────────────────────────────────────────────────────

/// Target 2: documents written before the sport-breakdown section existed
/// get the full default card list.
fn attach_sport_breakdown(doc: &mut Map<String, Value>) -> Result<()> {
  if !doc.contains_key("sportBreakdown") {
    doc.insert(
      "sportBreakdown".to_owned(),
      serde_json::to_value(defaults::sport_breakdown())?,
    );
  }
  Ok(())
}

/// Target 3: background images became positionable.
fn attach_background_position(doc: &mut Map<String, Value>) -> Result<()> {
  let year = ensure_object(doc, "yearInReview");
  if !year.contains_key("backgroundImagePosition") {
    year.insert(
      "backgroundImagePosition".to_owned(),
      serde_json::to_value(crate::document::BackgroundImagePosition::default())?,
    );
  }
  Ok(())
}

/// Target 4: per-activity-type preferences, special toggles, the first
/// default filter table, and inclusion flags on existing sport cards.
fn attach_activity_preferences(doc: &mut Map<String, Value>) -> Result<()> {
  let year = ensure_object(doc, "yearInReview");
  if !year.contains_key("activityTypeSettings") {
    year.insert(
      "activityTypeSettings".to_owned(),
      serde_json::to_value(defaults::activity_type_settings())?,
    );
  }
  if !year.contains_key("specialOptions") {
    year.insert(
      "specialOptions".to_owned(),
      serde_json::to_value(crate::document::SpecialOptions::default())?,
    );
  }
  if !year.contains_key("activityFilters") {
    year.insert(
      "activityFilters".to_owned(),
      serde_json::to_value(defaults::activity_filters_v4())?,
    );
  }

  // Cards written by earlier versions predate the inclusion flags.
  if let Some(cards) = doc
    .get_mut("sportBreakdown")
    .and_then(|b| b.get_mut("activities"))
    .and_then(Value::as_array_mut)
  {
    for card in cards.iter_mut().filter_map(Value::as_object_mut) {
      card
        .entry("includeInStats".to_owned())
        .or_insert(Value::Bool(true));
      card
        .entry("includeInHighlights".to_owned())
        .or_insert(Value::Bool(true));
    }
  }
  Ok(())
}

/// Target 5: the distance-bucket defaults were retuned. Refresh the buckets
/// of each default activity type without touching anything the user owns:
/// `titlePatterns` stay, entries for non-default activity types stay.
fn refresh_distance_defaults(doc: &mut Map<String, Value>) -> Result<()> {
  let year = ensure_object(doc, "yearInReview");
  let table = defaults::activity_filters();

  if !matches!(year.get("activityFilters"), Some(Value::Array(_))) {
    year.insert("activityFilters".to_owned(), serde_json::to_value(table)?);
    return Ok(());
  }

  if let Some(Value::Array(entries)) = year.get_mut("activityFilters") {
    for fresh in table {
      let position = entries.iter().position(|e| {
        e.get("activityType").and_then(Value::as_str) == Some(fresh.activity_type.as_str())
      });
      match position {
        Some(i) => {
          if let Some(entry) = entries[i].as_object_mut() {
            entry.insert(
              "distanceFilters".to_owned(),
              serde_json::to_value(&fresh.distance_filters)?,
            );
          }
        }
        None => entries.push(serde_json::to_value(fresh)?),
      }
    }
  }
  Ok(())
}

/// Get `doc[key]` as a mutable object, replacing anything that is missing or
/// not an object with `{}` first.
fn ensure_object<'a>(
  doc: &'a mut Map<String, Value>,
  key: &str,
) -> &'a mut Map<String, Value> {
  let slot = doc
    .entry(key.to_owned())
    .or_insert_with(|| Value::Object(Map::new()));
  if !slot.is_object() {
    *slot = Value::Object(Map::new());
  }
  match slot {
    Value::Object(map) => map,
    _ => unreachable!(),
  }
}

// ─── Result guarantees ───────────────────────────────────────────────────────

/// Repair the invariants a freshly-migrated document must satisfy: at most
/// one filter entry per activity type, unique bucket ids within an entry,
/// and card orders forming a permutation of `0..n` over a non-empty list.
/// Runs only on documents that actually migrated — a document already at the
/// current version is returned exactly as stored.
fn enforce_invariants(document: &mut SettingsDocument) {
  let filters = &mut document.year_in_review.activity_filters;
  let mut seen_types = std::collections::HashSet::new();
  filters.retain(|f| seen_types.insert(f.activity_type.clone()));
  for filter in filters.iter_mut() {
    let mut seen_ids = std::collections::HashSet::new();
    filter.distance_filters.retain(|d| seen_ids.insert(d.id.clone()));
  }

  let cards = &mut document.sport_breakdown.activities;
  if cards.is_empty() {
    *cards = defaults::sport_breakdown().activities;
    return;
  }
  let mut orders: Vec<u32> = cards.iter().map(|c| c.order).collect();
  orders.sort_unstable();
  let is_permutation = orders.iter().enumerate().all(|(i, &o)| o == i as u32);
  if !is_permutation {
    // Stable sort keeps the relative order of duplicates.
    cards.sort_by_key(|c| c.order);
    for (i, card) in cards.iter_mut().enumerate() {
      card.order = i as u32;
    }
  }
}
