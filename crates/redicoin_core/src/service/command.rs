//! Command boundary types consumed from the presentation layer.

use crate::ledger::balance::TransferReceipt;
use crate::ledger::ValidationError;
use crate::model::contact::{Contact, ContactDraft, ContactId};
use crate::model::workflow::Workflow;
use crate::notify::Notification;
use crate::repo::contact_directory::DirectoryError;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Command rejection. State is left as it was before the command.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    Validation(ValidationError),
    ContactNotFound(ContactId),
    /// Delete token was superseded, cancelled or already used.
    StaleConfirmation,
    /// Another workflow is already open.
    WorkflowBusy { active: Workflow },
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::StaleConfirmation => write!(f, "delete confirmation is no longer valid"),
            Self::WorkflowBusy { active } => {
                write!(f, "another workflow is already open: {active}")
            }
        }
    }
}

impl Error for DispatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for DispatchError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DirectoryError> for DispatchError {
    fn from(value: DirectoryError) -> Self {
        match value {
            DirectoryError::NotFound(id) => Self::ContactNotFound(id),
        }
    }
}

/// Opaque confirmation token bound to one delete request.
///
/// Text form is `<nonce>:<contact id>` so it can cross the FFI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeleteToken {
    nonce: u64,
    contact_id: ContactId,
}

impl DeleteToken {
    pub(crate) fn new(nonce: u64, contact_id: ContactId) -> Self {
        Self { nonce, contact_id }
    }

    /// Contact this token would delete.
    pub fn contact_id(&self) -> ContactId {
        self.contact_id
    }
}

impl Display for DeleteToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.nonce, self.contact_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDeleteTokenError(pub String);

impl Display for ParseDeleteTokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed delete token `{}`", self.0)
    }
}

impl Error for ParseDeleteTokenError {}

impl FromStr for DeleteToken {
    type Err = ParseDeleteTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseDeleteTokenError(value.to_string());
        let (nonce, contact_id) = value.trim().split_once(':').ok_or_else(malformed)?;
        Ok(Self {
            nonce: nonce.parse().map_err(|_| malformed())?,
            contact_id: contact_id.parse().map_err(|_| malformed())?,
        })
    }
}

/// Everything the presentation layer needs to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletSnapshot {
    pub balance: f64,
    /// Newest first.
    pub contacts: Vec<Contact>,
    pub workflow: Workflow,
    pub wallet_address: Option<String>,
    pub notification: Option<Notification>,
    pub prefilled_recipient: Option<Contact>,
    pub pending_edit: Option<Contact>,
    /// False while the last directory write-through failed.
    pub storage_synced: bool,
}

/// One user-triggered command.
#[derive(Debug, Clone, PartialEq)]
pub enum WalletCommand {
    OpenConnect,
    ConnectWallet,
    DisconnectWallet,
    OpenStake,
    Stake { amount: f64 },
    OpenTransfer,
    InitiateTransfer { id: ContactId },
    Transfer { amount: f64, address: String },
    OpenAddContact,
    OpenEditContact { id: ContactId },
    SaveContact { draft: ContactDraft },
    RequestDelete { id: ContactId },
    ConfirmDelete { token: DeleteToken },
    CancelDelete,
    CloseWorkflow,
    DismissNotification,
}

impl WalletCommand {
    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenConnect => "open_connect",
            Self::ConnectWallet => "connect_wallet",
            Self::DisconnectWallet => "disconnect_wallet",
            Self::OpenStake => "open_stake",
            Self::Stake { .. } => "stake",
            Self::OpenTransfer => "open_transfer",
            Self::InitiateTransfer { .. } => "initiate_transfer",
            Self::Transfer { .. } => "transfer",
            Self::OpenAddContact => "open_add_contact",
            Self::OpenEditContact { .. } => "open_edit_contact",
            Self::SaveContact { .. } => "save_contact",
            Self::RequestDelete { .. } => "request_delete",
            Self::ConfirmDelete { .. } => "confirm_delete",
            Self::CancelDelete => "cancel_delete",
            Self::CloseWorkflow => "close_workflow",
            Self::DismissNotification => "dismiss_notification",
        }
    }
}

/// Command-specific success payload.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Done,
    WalletConnected { address: String },
    Staked { balance: f64 },
    Transferred(TransferReceipt),
    ContactSaved(Contact),
    DeleteRequested(DeleteToken),
    ContactDeleted(Contact),
}

/// Command result plus the state to render afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReply {
    pub result: DispatchResult<CommandOutput>,
    pub snapshot: WalletSnapshot,
}

#[cfg(test)]
mod tests {
    use super::DeleteToken;

    #[test]
    fn delete_token_text_form_parses_back() {
        let token = DeleteToken::new(3, 1_700_000_000_123);
        let parsed: DeleteToken = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
        assert_eq!(parsed.contact_id(), 1_700_000_000_123);
    }

    #[test]
    fn delete_token_rejects_garbage() {
        assert!("abc".parse::<DeleteToken>().is_err());
        assert!("1:x".parse::<DeleteToken>().is_err());
    }
}
