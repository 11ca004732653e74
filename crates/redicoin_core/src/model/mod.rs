//! Domain model for the wallet dashboard core.
//!
//! # Responsibility
//! - Define the contact record and its user-supplied draft shape.
//! - Define the single active workflow slot owned by the dispatcher.
//!
//! # Invariants
//! - A contact `id` and `image_url` are fixed at creation.
//! - At most one workflow is open at any time.

pub mod contact;
pub mod workflow;
