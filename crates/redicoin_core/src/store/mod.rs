//! Durable key-value storage and the contact persistence adapter.
//!
//! # Responsibility
//! - Define the injected storage capability (`KeyValueStore`).
//! - Mirror the contact directory into storage under one fixed key.
//!
//! # Invariants
//! - Storage failures never propagate into dispatcher command results.
//! - The stored value is the full newest-first directory as JSON.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod contact_store;
pub mod kv_sqlite;
pub mod memory;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// The database file was migrated by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// Backend cannot serve requests (poisoned lock, injected failure...).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "schema version {found} is ahead of this build (max {supported})"
            ),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String key-value storage injected into the persistence adapter.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).put(key, value)
    }
}
