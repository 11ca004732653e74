//! Balance ledger and command-boundary validation errors.
//!
//! # Responsibility
//! - Own the single non-negative session balance.
//! - Validate stake/transfer requests before any mutation.
//!
//! # Invariants
//! - Balance is never negative and never NaN.
//! - A rejected request leaves the balance bit-for-bit unchanged.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod balance;

pub type LedgerResult<T> = Result<T, ValidationError>;

/// Rejection raised at the command boundary. Never mutates state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Amount is zero, negative or not finite.
    InvalidAmount(f64),
    /// Amount exceeds the available balance.
    InsufficientBalance { requested: f64, available: f64 },
    /// Transfer recipient address is empty.
    EmptyRecipient,
    /// Contact form field is empty.
    EmptyContactField(&'static str),
    /// Starting balance is negative or not finite.
    NegativeBalance(f64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount(amount) => write!(f, "amount must be positive, got {amount}"),
            Self::InsufficientBalance {
                requested,
                available,
            } => write!(
                f,
                "amount {requested} exceeds available balance {available}"
            ),
            Self::EmptyRecipient => write!(f, "recipient address cannot be empty"),
            Self::EmptyContactField(field) => write!(f, "contact {field} cannot be empty"),
            Self::NegativeBalance(value) => {
                write!(f, "balance must be a non-negative number, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}
