//! Active workflow slot.
//!
//! Replaces one open/closed flag per modal with a single tagged state, so
//! two workflows can never be open at once.

use crate::model::contact::ContactId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The single UI interaction flow currently open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "contact_id", rename_all = "snake_case")]
pub enum Workflow {
    #[default]
    Closed,
    Connecting,
    Staking,
    Transferring,
    AddingContact,
    EditingContact(ContactId),
}

impl Workflow {
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// True for the add and edit contact flows.
    pub fn is_contact_form(self) -> bool {
        matches!(self, Self::AddingContact | Self::EditingContact(_))
    }

    /// Contact targeted by an open edit flow.
    pub fn editing_id(self) -> Option<ContactId> {
        match self {
            Self::EditingContact(id) => Some(id),
            _ => None,
        }
    }

    /// Stable label for logs and FFI envelopes.
    pub fn label(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Connecting => "connecting",
            Self::Staking => "staking",
            Self::Transferring => "transferring",
            Self::AddingContact => "adding_contact",
            Self::EditingContact(_) => "editing_contact",
        }
    }
}

impl Display for Workflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EditingContact(id) => write!(f, "editing_contact({id})"),
            other => f.write_str(other.label()),
        }
    }
}
