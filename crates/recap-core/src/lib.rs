//! Core types and logic for the recap settings store.
//!
//! Holds the typed settings document, the literal default tables, the
//! versioned migration engine, and the [`store::SettingsStore`] owned by the
//! application root. This crate is deliberately free of database and
//! transport dependencies; persistence backends implement
//! [`store::SettingsPersistence`].

pub mod defaults;
pub mod document;
pub mod error;
pub mod filter;
pub mod migrate;
pub mod sport;
pub mod store;

pub use error::{Error, Result};
pub use migrate::{CURRENT_VERSION, migrate};
