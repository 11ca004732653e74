//! In-memory contact directory.
//!
//! # Responsibility
//! - Own the ordered contact collection and its CRUD contract.
//! - Stay storage-agnostic; persistence mirrors the directory afterwards.
//!
//! # Invariants
//! - All contact ids are distinct.
//! - Order is newest-first; create prepends.
//! - Failed update/delete leaves the collection untouched.

pub mod contact_directory;
