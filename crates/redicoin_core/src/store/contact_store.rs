//! Contact persistence adapter.
//!
//! # Responsibility
//! - Serialize the whole directory to JSON under one fixed key on every
//!   mutation.
//! - Load the directory once at startup, falling back to the seed set.
//!
//! # Invariants
//! - `deserialize_contacts(serialize_contacts(x)) == x` for any directory.
//! - Load never fails: missing, malformed or unreadable content yields the
//!   seed set and a reason.
//! - Save never fails: the outcome is returned for observability only.

use super::{KeyValueStore, StoreError};
use crate::model::contact::{seed_contacts, Contact, ContactId};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum PersistenceError {
    Serialize(serde_json::Error),
    Deserialize(serde_json::Error),
    /// Stored content repeats a contact id.
    DuplicateId(ContactId),
    Storage(StoreError),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize contacts: {err}"),
            Self::Deserialize(err) => write!(f, "failed to deserialize contacts: {err}"),
            Self::DuplicateId(id) => write!(f, "stored contacts repeat id {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) | Self::Deserialize(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<StoreError> for PersistenceError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

/// Why the seed set was used instead of stored content.
#[derive(Debug)]
pub enum SeedReason {
    /// Nothing stored under the key yet.
    Missing,
    /// Stored value could not be decoded.
    Malformed(PersistenceError),
    /// Storage read failed.
    Unreadable(PersistenceError),
}

/// Where the loaded directory came from.
#[derive(Debug)]
pub enum LoadSource {
    Stored,
    Seeded(SeedReason),
}

/// Startup load result.
#[derive(Debug)]
pub struct LoadReport {
    /// Newest-first contacts with distinct ids.
    pub contacts: Vec<Contact>,
    pub source: LoadSource,
}

/// Observable result of one write-through.
#[derive(Debug)]
pub enum PersistenceOutcome {
    Saved { count: usize },
    Failed(PersistenceError),
}

impl PersistenceOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Mirrors the contact directory into a key-value store.
pub struct ContactPersistence<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ContactPersistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the stored directory, or falls back to the seed set.
    pub fn load_or_seed(&self) -> LoadReport {
        let source = match self.store.get(&self.key) {
            Ok(Some(raw)) => match deserialize_contacts(&raw) {
                Ok(contacts) => {
                    info!(
                        "event=contacts_load module=store status=ok source=stored count={}",
                        contacts.len()
                    );
                    return LoadReport {
                        contacts,
                        source: LoadSource::Stored,
                    };
                }
                Err(err) => {
                    warn!("event=contacts_load module=store status=fallback reason=malformed error={err}");
                    SeedReason::Malformed(err)
                }
            },
            Ok(None) => {
                info!("event=contacts_load module=store status=fallback reason=missing");
                SeedReason::Missing
            }
            Err(err) => {
                warn!("event=contacts_load module=store status=fallback reason=unreadable error={err}");
                SeedReason::Unreadable(err.into())
            }
        };

        LoadReport {
            contacts: seed_contacts(),
            source: LoadSource::Seeded(source),
        }
    }

    /// Writes the full directory under the fixed key.
    pub fn save(&self, contacts: &[Contact]) -> PersistenceOutcome {
        let result = serialize_contacts(contacts)
            .and_then(|json| self.store.put(&self.key, &json).map_err(Into::into));

        match result {
            Ok(()) => PersistenceOutcome::Saved {
                count: contacts.len(),
            },
            Err(err) => PersistenceOutcome::Failed(err),
        }
    }
}

/// Encodes contacts to the storage JSON shape.
pub fn serialize_contacts(contacts: &[Contact]) -> Result<String, PersistenceError> {
    serde_json::to_string(contacts).map_err(PersistenceError::Serialize)
}

/// Decodes the storage JSON shape, rejecting repeated ids.
pub fn deserialize_contacts(raw: &str) -> Result<Vec<Contact>, PersistenceError> {
    let contacts: Vec<Contact> =
        serde_json::from_str(raw).map_err(PersistenceError::Deserialize)?;

    let mut seen = HashSet::with_capacity(contacts.len());
    for contact in &contacts {
        if !seen.insert(contact.id) {
            return Err(PersistenceError::DuplicateId(contact.id));
        }
    }
    Ok(contacts)
}
