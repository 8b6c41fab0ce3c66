//! The [`SettingsStore`] and the persistence abstraction behind it.
//!
//! The store is constructed once at application startup, migrates whatever
//! was persisted, and is the only writer afterwards — mutations take
//! `&mut self`, which is the single-writer guarantee the persisted record
//! needs. Persistence is a pluggable collaborator so the store can be tested
//! against an in-memory fake.

use std::future::Future;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::{
  document::{
    ActivityTypePreference, BackgroundImagePosition, SettingsDocument,
    SpecialOptions, VirtualExclusions, YearInReview,
  },
  error::Error as SettingsError,
  filter::{ActivityTypeFilter, DistanceFilter, DistanceOperator, DistanceUnit},
  migrate::{CURRENT_VERSION, migrate},
  sport::{SportBreakdown, SportCard},
};

// ─── Persisted record ────────────────────────────────────────────────────────

/// The single named record a backend stores: the raw document plus the
/// schema version it was written at.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedSettings {
  pub version:    u32,
  pub state:      serde_json::Value,
  /// Set by the store on every save.
  pub updated_at: DateTime<Utc>,
}

// ─── Persistence trait ───────────────────────────────────────────────────────

/// Abstraction over wherever the host keeps the settings record.
///
/// Implementations only move the record in and out of storage; versioning,
/// migration, and document shape are entirely the store's concern.
pub trait SettingsPersistence: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the record, or `None` if nothing has ever been saved.
  fn load(
    &self,
  ) -> impl Future<Output = Result<Option<PersistedSettings>, Self::Error>> + Send + '_;

  /// Write the record, replacing any previous one.
  fn save(
    &self,
    record: PersistedSettings,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── Error ───────────────────────────────────────────────────────────────────

/// Error surfaced by [`SettingsStore`] operations: either a settings-level
/// failure or one from the persistence backend.
#[derive(Debug, Error)]
pub enum StoreError<E: std::error::Error> {
  #[error("settings error: {0}")]
  Settings(#[from] SettingsError),

  #[error("persistence error: {0}")]
  Persistence(#[source] E),
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// The settings object owned by the application root.
///
/// Holds the current-version document in memory; every mutation persists the
/// whole document before returning.
pub struct SettingsStore<P> {
  persistence: P,
  document:    SettingsDocument,
}

impl<P: SettingsPersistence> SettingsStore<P> {
  /// Load, migrate, and (when anything changed) save back under
  /// [`CURRENT_VERSION`].
  ///
  /// A record that is not minimally shaped as a JSON object — or that claims
  /// the current version but no longer deserialises — is replaced with full
  /// defaults rather than failing startup.
  pub async fn open(persistence: P) -> Result<Self, StoreError<P::Error>> {
    let loaded = persistence
      .load()
      .await
      .map_err(StoreError::Persistence)?;

    let (document, dirty) = match loaded {
      None => (SettingsDocument::default(), true),
      Some(record) => match migrate(record.state, record.version) {
        Ok(document) => (document, record.version < CURRENT_VERSION),
        Err(err) => {
          warn!(%err, "stored settings are unreadable; resetting to defaults");
          (SettingsDocument::default(), true)
        }
      },
    };

    let store = Self { persistence, document };
    if dirty {
      store.persist().await?;
    }
    Ok(store)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn document(&self) -> &SettingsDocument { &self.document }

  pub fn year_in_review(&self) -> &YearInReview { &self.document.year_in_review }

  pub fn sport_breakdown(&self) -> &SportBreakdown {
    &self.document.sport_breakdown
  }

  // ── Display preferences ───────────────────────────────────────────────────

  pub async fn set_background_image(
    &mut self,
    image: Option<String>,
  ) -> Result<(), StoreError<P::Error>> {
    self.document.year_in_review.background_image = image;
    self.persist().await
  }

  pub async fn set_background_image_position(
    &mut self,
    position: BackgroundImagePosition,
  ) -> Result<(), StoreError<P::Error>> {
    self.document.year_in_review.background_image_position = position;
    self.persist().await
  }

  /// Add `activity_type` to the excluded set, or remove it if already there.
  /// Returns whether the type is excluded afterwards.
  pub async fn toggle_activity_type_excluded(
    &mut self,
    activity_type: &str,
  ) -> Result<bool, StoreError<P::Error>> {
    let excluded = &mut self.document.year_in_review.excluded_activity_types;
    let now_excluded = match excluded.iter().position(|t| t == activity_type) {
      Some(i) => {
        excluded.remove(i);
        false
      }
      None => {
        excluded.push(activity_type.to_owned());
        true
      }
    };
    self.persist().await?;
    Ok(now_excluded)
  }

  pub async fn set_virtual_exclusions(
    &mut self,
    exclusions: VirtualExclusions,
  ) -> Result<(), StoreError<P::Error>> {
    self.document.year_in_review.virtual_exclusions = exclusions;
    self.persist().await
  }

  pub async fn set_ignored_title_patterns(
    &mut self,
    patterns: Vec<String>,
  ) -> Result<(), StoreError<P::Error>> {
    self.document.year_in_review.ignored_title_patterns = patterns;
    self.persist().await
  }

  pub async fn set_highlight_stats(
    &mut self,
    stats: Vec<String>,
  ) -> Result<(), StoreError<P::Error>> {
    self.document.year_in_review.highlight_stats = stats;
    self.persist().await
  }

  pub async fn set_special_options(
    &mut self,
    options: SpecialOptions,
  ) -> Result<(), StoreError<P::Error>> {
    self.document.year_in_review.special_options = options;
    self.persist().await
  }

  pub async fn set_activity_type_settings(
    &mut self,
    settings: Vec<ActivityTypePreference>,
  ) -> Result<(), StoreError<P::Error>> {
    self.document.year_in_review.activity_type_settings = settings;
    self.persist().await
  }

  // ── Sport cards ───────────────────────────────────────────────────────────

  pub async fn set_sport_enabled(
    &mut self,
    sport_id: &str,
    enabled: bool,
  ) -> Result<(), StoreError<P::Error>> {
    self.sport_card_mut(sport_id)?.enabled = enabled;
    self.persist().await
  }

  pub async fn set_sport_inclusion(
    &mut self,
    sport_id: &str,
    include_in_stats: bool,
    include_in_highlights: bool,
  ) -> Result<(), StoreError<P::Error>> {
    let card = self.sport_card_mut(sport_id)?;
    card.include_in_stats = include_in_stats;
    card.include_in_highlights = include_in_highlights;
    self.persist().await
  }

  /// Re-assign card orders to match `ids`, which must name every card
  /// exactly once.
  pub async fn reorder_sports(
    &mut self,
    ids: &[&str],
  ) -> Result<(), StoreError<P::Error>> {
    let cards = &mut self.document.sport_breakdown.activities;

    for id in ids {
      if !cards.iter().any(|c| c.id == *id) {
        return Err(SettingsError::UnknownSport((*id).to_owned()).into());
      }
    }
    let mut seen = std::collections::HashSet::new();
    if ids.len() != cards.len() || !ids.iter().all(|id| seen.insert(*id)) {
      return Err(SettingsError::InvalidReorder.into());
    }

    for card in cards.iter_mut() {
      // Every card id appears in `ids` — checked above.
      if let Some(i) = ids.iter().position(|id| *id == card.id) {
        card.order = i as u32;
      }
    }
    self.persist().await
  }

  // ── Activity filters ──────────────────────────────────────────────────────

  /// Add a distance bucket under `activity_type`, creating the filter entry
  /// on demand. Returns the id of the new bucket.
  pub async fn add_distance_filter(
    &mut self,
    activity_type: &str,
    operator: DistanceOperator,
    value: f64,
    unit: DistanceUnit,
  ) -> Result<String, StoreError<P::Error>> {
    let id = Uuid::new_v4().to_string();
    let entry = self.filter_entry_or_default(activity_type);
    entry.distance_filters.push(DistanceFilter {
      id: id.clone(),
      operator,
      value,
      unit,
    });
    self.persist().await?;
    Ok(id)
  }

  pub async fn remove_distance_filter(
    &mut self,
    activity_type: &str,
    id: &str,
  ) -> Result<(), StoreError<P::Error>> {
    let entry = self.filter_entry_mut(activity_type)?;
    let before = entry.distance_filters.len();
    entry.distance_filters.retain(|d| d.id != id);
    if entry.distance_filters.len() == before {
      return Err(
        SettingsError::DistanceFilterNotFound {
          activity_type: activity_type.to_owned(),
          id:            id.to_owned(),
        }
        .into(),
      );
    }
    self.persist().await
  }

  /// Add a title pattern under `activity_type`, creating the filter entry on
  /// demand. Duplicate patterns are ignored.
  pub async fn add_title_pattern(
    &mut self,
    activity_type: &str,
    pattern: &str,
  ) -> Result<(), StoreError<P::Error>> {
    let entry = self.filter_entry_or_default(activity_type);
    if !entry.title_patterns.iter().any(|p| p == pattern) {
      entry.title_patterns.push(pattern.to_owned());
    }
    self.persist().await
  }

  pub async fn remove_title_pattern(
    &mut self,
    activity_type: &str,
    pattern: &str,
  ) -> Result<(), StoreError<P::Error>> {
    let entry = self.filter_entry_mut(activity_type)?;
    entry.title_patterns.retain(|p| p != pattern);
    self.persist().await
  }

  /// Drop the whole filter entry for `activity_type`.
  pub async fn remove_activity_filter(
    &mut self,
    activity_type: &str,
  ) -> Result<(), StoreError<P::Error>> {
    let filters = &mut self.document.year_in_review.activity_filters;
    let before = filters.len();
    filters.retain(|f| f.activity_type != activity_type);
    if filters.len() == before {
      return Err(SettingsError::FilterNotFound(activity_type.to_owned()).into());
    }
    self.persist().await
  }

  // ── Reset ─────────────────────────────────────────────────────────────────

  /// Replace the document with full defaults and persist them.
  pub async fn reset_to_defaults(&mut self) -> Result<(), StoreError<P::Error>> {
    warn!("resetting settings to defaults");
    self.document = SettingsDocument::default();
    self.persist().await
  }

  // ── Internals ─────────────────────────────────────────────────────────────

  async fn persist(&self) -> Result<(), StoreError<P::Error>> {
    let record = PersistedSettings {
      version:    CURRENT_VERSION,
      state:      serde_json::to_value(&self.document)
        .map_err(SettingsError::Serialization)?,
      updated_at: Utc::now(),
    };
    self
      .persistence
      .save(record)
      .await
      .map_err(StoreError::Persistence)
  }

  fn sport_card_mut(
    &mut self,
    sport_id: &str,
  ) -> Result<&mut SportCard, SettingsError> {
    self
      .document
      .sport_breakdown
      .activities
      .iter_mut()
      .find(|c| c.id == sport_id)
      .ok_or_else(|| SettingsError::UnknownSport(sport_id.to_owned()))
  }

  fn filter_entry_mut(
    &mut self,
    activity_type: &str,
  ) -> Result<&mut ActivityTypeFilter, SettingsError> {
    self
      .document
      .year_in_review
      .activity_filters
      .iter_mut()
      .find(|f| f.activity_type == activity_type)
      .ok_or_else(|| SettingsError::FilterNotFound(activity_type.to_owned()))
  }

  fn filter_entry_or_default(
    &mut self,
    activity_type: &str,
  ) -> &mut ActivityTypeFilter {
    let filters = &mut self.document.year_in_review.activity_filters;
    if let Some(i) = filters.iter().position(|f| f.activity_type == activity_type) {
      return &mut filters[i];
    }
    filters.push(ActivityTypeFilter::empty(activity_type));
    let last = filters.len() - 1;
    &mut filters[last]
  }
}
