//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose wallet commands to Dart via FRB as flat, UI-ready envelopes.
//! - Own the process-wide session and serialize every command through it.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Every command response carries the full post-command state.
//! - A session that failed to start answers every call with `ok=false`
//!   and an empty closed state.

use log::error;
use redicoin_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CommandOutput, CommandQueue, CommandReply, Contact, ContactDraft, ContactType, DeleteToken,
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, WalletCommand, WalletConfig,
    WalletDispatcher, WalletSnapshot, Workflow,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const WALLET_DB_FILE_NAME: &str = "redicoin_wallet.sqlite3";
const WALLET_DB_PATH_ENV: &str = "REDICOIN_DB_PATH";

type SessionStore = Box<dyn KeyValueStore>;

static SESSION: OnceLock<Result<CommandQueue<SessionStore>, String>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: `trace|debug|info|warn|error`, case-insensitive.
/// - `log_dir`: absolute directory for rolling log files.
///
/// # FFI contract
/// - Sync call; may create the log directory.
/// - Idempotent for the same `level + log_dir`; a different pair is an error.
/// - Never panics; returns empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Contact row as rendered by the directory screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactView {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub address: String,
    pub image_url: String,
    /// `pessoa|empresa`.
    pub kind: String,
}

/// Notification slot content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub message: String,
    pub visible: bool,
    /// How long the UI should keep it on screen.
    pub display_ms: u64,
}

/// Full render state.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletView {
    pub balance: f64,
    pub contacts: Vec<ContactView>,
    /// `closed|connecting|staking|transferring|adding_contact|editing_contact`.
    pub workflow: String,
    pub wallet_address: Option<String>,
    pub notification: Option<NotificationView>,
    /// Address to prefill in the transfer form.
    pub prefilled_recipient: Option<String>,
    pub pending_edit: Option<ContactView>,
    /// False while the last contact write-through failed.
    pub storage_synced: bool,
}

/// Command response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletResponse {
    /// Whether the command was accepted.
    pub ok: bool,
    /// Rejection reason, empty on success.
    pub message: String,
    /// Set by `contact_request_delete`; pass back to `contact_confirm_delete`.
    pub confirmation_token: Option<String>,
    pub state: WalletView,
}

/// Current render state without running a command.
///
/// # FFI contract
/// - Sync call; opens the session store on first use.
/// - Never panics.
/// - `ok=false` only when the session could not start.
#[flutter_rust_bridge::frb(sync)]
pub fn wallet_state() -> WalletResponse {
    match session() {
        Ok(queue) => WalletResponse {
            ok: true,
            message: String::new(),
            confirmation_token: None,
            state: to_view(queue.snapshot(), display_ms(queue)),
        },
        Err(reason) => unavailable(reason),
    }
}

/// Opens the connect-wallet dialog.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics.
/// - Rejected with `ok=false` while another workflow is open.
#[flutter_rust_bridge::frb(sync)]
pub fn wallet_open_connect() -> WalletResponse {
    submit(WalletCommand::OpenConnect)
}

/// Assigns a fresh session wallet address and closes any open workflow.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics; always accepted.
/// - Emits the "connected" notification.
#[flutter_rust_bridge::frb(sync)]
pub fn wallet_connect() -> WalletResponse {
    submit(WalletCommand::ConnectWallet)
}

/// Forgets the session wallet address.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics; always accepted, emits no notification.
#[flutter_rust_bridge::frb(sync)]
pub fn wallet_disconnect() -> WalletResponse {
    submit(WalletCommand::DisconnectWallet)
}

/// Opens the stake form.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics.
/// - Rejected with `ok=false` while another workflow is open.
#[flutter_rust_bridge::frb(sync)]
pub fn wallet_open_stake() -> WalletResponse {
    submit(WalletCommand::OpenStake)
}

/// Stakes `amount` from the balance.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics.
/// - `ok=false` unless `0 < amount <= balance`; the form stays open then.
#[flutter_rust_bridge::frb(sync)]
pub fn wallet_stake(amount: f64) -> WalletResponse {
    submit(WalletCommand::Stake { amount })
}

/// Opens the transfer form with an empty recipient.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics.
/// - Rejected with `ok=false` while another workflow is open.
#[flutter_rust_bridge::frb(sync)]
pub fn wallet_open_transfer() -> WalletResponse {
    submit(WalletCommand::OpenTransfer)
}

/// Sends `amount` to `address`; the notification names a matching contact.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics.
/// - `ok=false` for a bad amount or blank address; form and prefill are kept.
#[flutter_rust_bridge::frb(sync)]
pub fn wallet_transfer(amount: f64, address: String) -> WalletResponse {
    submit(WalletCommand::Transfer { amount, address })
}

/// Closes whatever workflow is open.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics; always accepted.
#[flutter_rust_bridge::frb(sync)]
pub fn workflow_close() -> WalletResponse {
    submit(WalletCommand::CloseWorkflow)
}

/// Clears the notification slot once the UI finished showing it.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics; always accepted.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_dismiss() -> WalletResponse {
    submit(WalletCommand::DismissNotification)
}

/// Opens the transfer form prefilled with one contact.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics.
/// - The contact is resolved inside the same serialized command;
///   `ok=false` when it does not exist or another workflow is open.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_initiate_transfer(contact_id: i64) -> WalletResponse {
    submit(WalletCommand::InitiateTransfer { id: contact_id })
}

/// Opens the contact form in create mode.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics.
/// - Rejected with `ok=false` while another workflow is open.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_open_add() -> WalletResponse {
    submit(WalletCommand::OpenAddContact)
}

/// Opens the contact form in edit mode.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics.
/// - `ok=false` when the contact does not exist or another workflow is open.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_open_edit(contact_id: i64) -> WalletResponse {
    submit(WalletCommand::OpenEditContact { id: contact_id })
}

/// Saves the open contact form (create or update).
///
/// `kind` accepts `pessoa|empresa` (or `person|company`).
///
/// # FFI contract
/// - Sync call, storage-backed write-through.
/// - Never panics.
/// - `ok=false` for blank fields or an unknown `kind`; a failed write keeps
///   `ok=true` and reports `storage_synced=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_save(
    name: String,
    username: String,
    address: String,
    kind: String,
) -> WalletResponse {
    let Some(kind) = ContactType::parse(&kind) else {
        return rejected(format!("unsupported contact type `{}`", kind.trim()));
    };
    let draft = ContactDraft::new(name.trim(), username.trim(), address.trim(), kind);
    submit(WalletCommand::SaveContact { draft })
}

/// First delete phase; returns `confirmation_token` on success.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics.
/// - A newer request invalidates any earlier token.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_request_delete(contact_id: i64) -> WalletResponse {
    submit(WalletCommand::RequestDelete { id: contact_id })
}

/// Second delete phase; only the latest token is honored.
///
/// # FFI contract
/// - Sync call, storage-backed write-through.
/// - Never panics.
/// - `ok=false` for malformed, cancelled, superseded or reused tokens.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_confirm_delete(token: String) -> WalletResponse {
    match token.parse::<DeleteToken>() {
        Ok(token) => submit(WalletCommand::ConfirmDelete { token }),
        Err(err) => rejected(err.to_string()),
    }
}

/// Drops the outstanding delete token.
///
/// # FFI contract
/// - Sync call, in-memory state change.
/// - Never panics; always accepted.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_cancel_delete() -> WalletResponse {
    submit(WalletCommand::CancelDelete)
}

fn session() -> Result<&'static CommandQueue<SessionStore>, &'static str> {
    SESSION
        .get_or_init(|| start_session(WalletConfig::default(), open_store()))
        .as_ref()
        .map_err(String::as_str)
}

fn start_session(
    config: WalletConfig,
    store: SessionStore,
) -> Result<CommandQueue<SessionStore>, String> {
    WalletDispatcher::start(config, store)
        .map(CommandQueue::new)
        .map_err(|err| {
            error!("event=ffi_session module=ffi status=error error={err}");
            format!("wallet session unavailable: {err}")
        })
}

fn open_store() -> SessionStore {
    let path = resolve_db_path();
    match SqliteKeyValueStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(err) => {
            error!("event=ffi_session module=ffi status=fallback store=memory error={err}");
            Box::new(MemoryKeyValueStore::new())
        }
    }
}

fn resolve_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var(WALLET_DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(WALLET_DB_FILE_NAME)
}

fn submit(command: WalletCommand) -> WalletResponse {
    match session() {
        Ok(queue) => to_response(queue.submit(command), display_ms(queue)),
        Err(reason) => unavailable(reason),
    }
}

fn display_ms(queue: &CommandQueue<SessionStore>) -> u64 {
    queue.inspect(|dispatcher| dispatcher.config().notification_display_ms)
}

fn unavailable(reason: &str) -> WalletResponse {
    WalletResponse {
        ok: false,
        message: reason.to_string(),
        confirmation_token: None,
        state: WalletView {
            balance: 0.0,
            contacts: Vec::new(),
            workflow: Workflow::Closed.label().to_string(),
            wallet_address: None,
            notification: None,
            prefilled_recipient: None,
            pending_edit: None,
            storage_synced: false,
        },
    }
}

fn rejected(message: String) -> WalletResponse {
    let mut response = wallet_state();
    response.ok = false;
    response.message = message;
    response
}

fn to_response(reply: CommandReply, display_ms: u64) -> WalletResponse {
    let (ok, message, confirmation_token) = match &reply.result {
        Ok(CommandOutput::DeleteRequested(token)) => (true, String::new(), Some(token.to_string())),
        Ok(_) => (true, String::new(), None),
        Err(err) => (false, err.to_string(), None),
    };
    WalletResponse {
        ok,
        message,
        confirmation_token,
        state: to_view(reply.snapshot, display_ms),
    }
}

fn to_view(snapshot: WalletSnapshot, display_ms: u64) -> WalletView {
    WalletView {
        balance: snapshot.balance,
        contacts: snapshot.contacts.into_iter().map(to_contact_view).collect(),
        workflow: snapshot.workflow.label().to_string(),
        wallet_address: snapshot.wallet_address,
        notification: snapshot.notification.map(|notification| NotificationView {
            message: notification.message,
            visible: notification.visible,
            display_ms,
        }),
        prefilled_recipient: snapshot
            .prefilled_recipient
            .map(|contact| contact.address),
        pending_edit: snapshot.pending_edit.map(to_contact_view),
        storage_synced: snapshot.storage_synced,
    }
}

fn to_contact_view(contact: Contact) -> ContactView {
    ContactView {
        id: contact.id,
        name: contact.name,
        username: contact.username,
        address: contact.address,
        image_url: contact.image_url,
        kind: contact.kind.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        contact_confirm_delete, contact_initiate_transfer, contact_open_add, contact_open_edit,
        contact_request_delete, contact_save, core_version, init_logging, ping, start_session,
        to_response, unavailable, wallet_state, workflow_close,
    };
    use redicoin_core::{
        CommandQueue, FixedTokenSource, MemoryKeyValueStore, SequenceIdSource, WalletCommand,
        WalletConfig, WalletDispatcher,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn response_carries_delete_token_and_rejections() {
        let dispatcher = WalletDispatcher::start_with_sources(
            WalletConfig::default(),
            MemoryKeyValueStore::new(),
            Box::new(SequenceIdSource::starting_at(1)),
            Box::new(FixedTokenSource::new("a")),
        )
        .unwrap();
        let queue = CommandQueue::new(dispatcher);

        let requested = to_response(queue.submit(WalletCommand::RequestDelete { id: 2 }), 3000);
        assert!(requested.ok);
        assert!(requested.confirmation_token.is_some());

        let stake = to_response(queue.submit(WalletCommand::Stake { amount: -1.0 }), 3000);
        assert!(!stake.ok);
        assert!(stake.message.contains("positive"));
        assert_eq!(stake.state.balance, 1000.0);
        assert_eq!(stake.state.workflow, "closed");
    }

    #[test]
    fn failed_session_start_is_reported_not_panicked() {
        let reason = start_session(
            WalletConfig::default().with_initial_balance(f64::NAN),
            Box::new(MemoryKeyValueStore::new()),
        )
        .err()
        .unwrap();
        assert!(reason.starts_with("wallet session unavailable"));

        let response = unavailable(&reason);
        assert!(!response.ok);
        assert_eq!(response.message, reason);
        assert_eq!(response.state.workflow, "closed");
        assert!(response.state.contacts.is_empty());
    }

    #[test]
    fn session_flow_adds_then_deletes_contact() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(
            "REDICOIN_DB_PATH",
            dir.path().join("ffi.sqlite3").to_str().unwrap(),
        );

        let before = wallet_state().state.contacts.len();
        assert!(contact_open_add().ok);
        let saved = contact_save(
            "Loja Azul".to_string(),
            "loja.rc".to_string(),
            "0xloja".to_string(),
            "empresa".to_string(),
        );
        assert!(saved.ok, "{}", saved.message);
        assert_eq!(saved.state.contacts.len(), before + 1);
        let created = saved.state.contacts[0].clone();
        assert_eq!(created.kind, "empresa");
        assert_eq!(
            saved.state.notification.unwrap().message,
            "Contato 'Loja Azul' adicionado!"
        );

        let requested = contact_request_delete(created.id);
        let token = requested.confirmation_token.expect("token should be returned");
        let deleted = contact_confirm_delete(token.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert_eq!(deleted.state.contacts.len(), before);

        let replay = contact_confirm_delete(token);
        assert!(!replay.ok);
        assert!(!contact_confirm_delete("garbage".to_string()).ok);

        let stale_transfer = contact_initiate_transfer(created.id);
        assert!(!stale_transfer.ok);
        assert!(stale_transfer.message.contains(&created.id.to_string()));
        assert_eq!(stale_transfer.state.workflow, "closed");
        assert!(!contact_open_edit(created.id).ok);

        let first = deleted.state.contacts[0].id;
        let opened = contact_initiate_transfer(first);
        assert!(opened.ok, "{}", opened.message);
        assert_eq!(opened.state.workflow, "transferring");
        assert!(opened.state.prefilled_recipient.is_some());
        assert!(workflow_close().ok);
    }
}
