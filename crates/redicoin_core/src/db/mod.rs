//! SQLite bootstrap for durable key-value storage.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the wallet core.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No storage read/write happens before migrations succeed.
//! - Failures surface as [`StoreError`](crate::store::StoreError); callers
//!   only ever see the storage-level error type.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
