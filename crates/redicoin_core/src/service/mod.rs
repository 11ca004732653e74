//! Command dispatcher and its serialized command queue.
//!
//! # Responsibility
//! - Route UI commands to the ledger and directory, drive persistence and
//!   notifications, and own the single workflow slot.
//! - Offer one mutation queue for callers issuing commands from several
//!   input sources.
//!
//! # Invariants
//! - Balance and directory are mutated only through the dispatcher.
//! - A rejected command leaves every piece of state unchanged.

pub mod command;
pub mod command_queue;
pub mod wallet_dispatcher;
