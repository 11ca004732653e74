//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record persisted by the directory.
//! - Provide the editable draft shape submitted by add/edit workflows.
//! - Provide the fixed seed set used when storage is empty or unreadable.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `image_url` is assigned once at creation and survives updates.
//! - No uniqueness is enforced on `address` or `username`.

use crate::ledger::ValidationError;
use serde::{Deserialize, Serialize};

/// Stable contact identifier.
///
/// Generated ids are epoch milliseconds, so the value fits `i64` and
/// round-trips through JSON numbers.
pub type ContactId = i64;

/// Base URL for generated avatar references.
pub const AVATAR_BASE_URL: &str = "https://i.pravatar.cc/150";

/// Contact classification.
///
/// Serialized with the storage vocabulary (`pessoa` / `empresa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactType {
    #[serde(rename = "pessoa")]
    Person,
    #[serde(rename = "empresa")]
    Company,
}

impl ContactType {
    /// Storage/wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "pessoa",
            Self::Company => "empresa",
        }
    }

    /// Parses a storage/wire label. Accepts the English names as well.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pessoa" | "person" => Some(Self::Person),
            "empresa" | "company" => Some(Self::Company),
            _ => None,
        }
    }
}

/// Canonical contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub username: String,
    pub address: String,
    /// Avatar reference, generated once on create.
    pub image_url: String,
    /// Serialized as `type` to match the storage schema.
    #[serde(rename = "type")]
    pub kind: ContactType,
}

impl Contact {
    /// Builds a record from a draft plus the creation-time identity fields.
    pub fn from_draft(id: ContactId, image_url: impl Into<String>, draft: ContactDraft) -> Self {
        Self {
            id,
            name: draft.name,
            username: draft.username,
            address: draft.address,
            image_url: image_url.into(),
            kind: draft.kind,
        }
    }

    /// Replaces the editable fields, keeping `id` and `image_url`.
    pub fn apply_draft(&mut self, draft: ContactDraft) {
        self.name = draft.name;
        self.username = draft.username;
        self.address = draft.address;
        self.kind = draft.kind;
    }

    /// Returns the editable fields as a draft (used to prefill edit forms).
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            username: self.username.clone(),
            address: self.address.clone(),
            kind: self.kind,
        }
    }
}

/// User-editable contact fields submitted by the add/edit workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub username: String,
    pub address: String,
    #[serde(rename = "type")]
    pub kind: ContactType,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        address: impl Into<String>,
        kind: ContactType,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            address: address.into(),
            kind,
        }
    }

    /// Checks that every text field is non-empty after trimming.
    ///
    /// Format is intentionally not checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("name", &self.name),
            ("username", &self.username),
            ("address", &self.address),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyContactField(field));
            }
        }
        Ok(())
    }
}

/// Avatar reference generated for a freshly created contact.
pub fn generated_image_url(id: ContactId) -> String {
    format!("{AVATAR_BASE_URL}?u={id}")
}

/// Fixed contact set used on first start or when storage is unreadable.
pub fn seed_contacts() -> Vec<Contact> {
    vec![
        seed_contact(
            1,
            ("Ana Clara", "ana.rc"),
            "0x1A2b3c4D5e6F7g8H9i0J1k2L3m4N5o6P7q8R9s0T",
            1,
            ContactType::Person,
        ),
        seed_contact(
            2,
            ("Bruno Alves", "bruno.rc"),
            "0x2B3c4D5e6F7g8H9i0J1k2L3m4N5o6P7q8R9s0T1A",
            2,
            ContactType::Person,
        ),
        seed_contact(
            3,
            ("Design Co.", "designco.rc"),
            "0x3C4d5E6f7G8h9I0j1K2l3M4n5O6p7Q8r9S0t1A2b",
            30,
            ContactType::Company,
        ),
        seed_contact(
            4,
            ("Daniel Souza", "daniel.rc"),
            "0x4D5e6F7g8H9i0J1k2L3m4N5o6P7q8R9s0T1a2B3c",
            4,
            ContactType::Person,
        ),
    ]
}

fn seed_contact(
    id: ContactId,
    (name, username): (&str, &str),
    address: &str,
    avatar: u32,
    kind: ContactType,
) -> Contact {
    Contact {
        id,
        name: name.to_string(),
        username: username.to_string(),
        address: address.to_string(),
        image_url: format!("{AVATAR_BASE_URL}?img={avatar}"),
        kind,
    }
}
