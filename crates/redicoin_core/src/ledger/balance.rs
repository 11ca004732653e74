//! Session balance with validated stake/transfer mutations.

use super::{LedgerResult, ValidationError};
use crate::repo::contact_directory::ContactDirectory;

const SHORT_ADDRESS_HEAD: usize = 6;
const SHORT_ADDRESS_TAIL: usize = 4;

/// Result of a successful transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    pub amount: f64,
    pub recipient_address: String,
    /// Matching contact name, or the shortened address.
    pub recipient_name: String,
    /// Balance after the debit.
    pub balance: f64,
}

/// Owner of the session balance.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceLedger {
    balance: f64,
}

impl BalanceLedger {
    /// Creates a ledger with a starting balance.
    ///
    /// # Errors
    /// - `NegativeBalance` when `initial` is negative or not finite.
    pub fn new(initial: f64) -> LedgerResult<Self> {
        if !initial.is_finite() || initial < 0.0 {
            return Err(ValidationError::NegativeBalance(initial));
        }
        Ok(Self { balance: initial })
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Deducts a staked amount and returns the new balance.
    ///
    /// # Errors
    /// - `InvalidAmount` unless `amount > 0`.
    /// - `InsufficientBalance` when `amount > balance`.
    pub fn stake(&mut self, amount: f64) -> LedgerResult<f64> {
        self.check_debit(amount)?;
        self.balance -= amount;
        Ok(self.balance)
    }

    /// Deducts a transferred amount and resolves the recipient display name.
    ///
    /// The name is the first contact whose address matches exactly, or the
    /// shortened address when no contact matches.
    ///
    /// # Errors
    /// - `InvalidAmount` / `InsufficientBalance` as for [`Self::stake`].
    /// - `EmptyRecipient` when the address is blank.
    pub fn transfer(
        &mut self,
        amount: f64,
        recipient_address: &str,
        directory: &ContactDirectory,
    ) -> LedgerResult<TransferReceipt> {
        self.check_debit(amount)?;
        if recipient_address.trim().is_empty() {
            return Err(ValidationError::EmptyRecipient);
        }

        let recipient_name = directory
            .find_by_address(recipient_address)
            .map(|contact| contact.name.clone())
            .unwrap_or_else(|| short_address(recipient_address));

        self.balance -= amount;
        Ok(TransferReceipt {
            amount,
            recipient_address: recipient_address.to_string(),
            recipient_name,
            balance: self.balance,
        })
    }

    fn check_debit(&self, amount: f64) -> LedgerResult<()> {
        // NaN fails `> 0.0`, so it lands here too.
        if !(amount.is_finite() && amount > 0.0) {
            return Err(ValidationError::InvalidAmount(amount));
        }
        if amount > self.balance {
            return Err(ValidationError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }
        Ok(())
    }
}

/// Shortens an address to its first 6 and last 4 characters.
///
/// Works on chars, so non-ASCII input never splits a code point. Short
/// inputs overlap rather than pad, e.g. `0x12` -> `0x12...0x12`.
pub fn short_address(address: &str) -> String {
    let chars = address.chars().collect::<Vec<_>>();
    let head = chars
        .iter()
        .take(SHORT_ADDRESS_HEAD)
        .collect::<String>();
    let tail = chars[chars.len().saturating_sub(SHORT_ADDRESS_TAIL)..]
        .iter()
        .collect::<String>();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::{short_address, BalanceLedger};
    use crate::ledger::ValidationError;

    #[test]
    fn short_address_keeps_head_and_tail() {
        assert_eq!(
            short_address("0x9f8e7d6c5b4a39281706f5e4d3c2b1a098765432"),
            "0x9f8e...5432"
        );
    }

    #[test]
    fn short_address_overlaps_on_tiny_input() {
        assert_eq!(short_address("0x12"), "0x12...0x12");
        assert_eq!(short_address(""), "...");
    }

    #[test]
    fn new_rejects_negative_and_nan() {
        assert!(matches!(
            BalanceLedger::new(-1.0),
            Err(ValidationError::NegativeBalance(_))
        ));
        assert!(BalanceLedger::new(f64::NAN).is_err());
        assert_eq!(BalanceLedger::new(0.0).unwrap().balance(), 0.0);
    }

    #[test]
    fn stake_rejects_nan_and_infinity() {
        let mut ledger = BalanceLedger::new(10.0).unwrap();
        assert!(ledger.stake(f64::NAN).is_err());
        assert!(ledger.stake(f64::INFINITY).is_err());
        assert_eq!(ledger.balance().to_bits(), 10.0_f64.to_bits());
    }
}
