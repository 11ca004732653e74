//! Core state management for the REDICOIN wallet dashboard.
//! This crate is the single source of truth for balance, contact and
//! workflow invariants; presentation layers only issue commands and render
//! the returned snapshots.

pub mod config;
pub mod db;
pub mod ident;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;
pub mod store;

pub use config::WalletConfig;
pub use ident::{
    ClockIdSource, FixedTokenSource, IdSource, RandomHexSource, SequenceIdSource, TokenSource,
};
pub use ledger::balance::{short_address, BalanceLedger, TransferReceipt};
pub use ledger::{LedgerResult, ValidationError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{seed_contacts, Contact, ContactDraft, ContactId, ContactType};
pub use model::workflow::Workflow;
pub use notify::{Notification, NotificationChannel};
pub use repo::contact_directory::{ContactDirectory, DirectoryError, DirectoryResult};
pub use service::command::{
    CommandOutput, CommandReply, DeleteToken, DispatchError, DispatchResult, WalletCommand,
    WalletSnapshot,
};
pub use service::command_queue::CommandQueue;
pub use service::wallet_dispatcher::WalletDispatcher;
pub use store::contact_store::{
    deserialize_contacts, serialize_contacts, ContactPersistence, LoadReport, LoadSource,
    PersistenceError, PersistenceOutcome, SeedReason,
};
pub use store::kv_sqlite::SqliteKeyValueStore;
pub use store::memory::MemoryKeyValueStore;
pub use store::{KeyValueStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
