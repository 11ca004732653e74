//! Session configuration.

use serde::{Deserialize, Serialize};

/// Storage key holding the serialized contact directory.
pub const CONTACTS_STORAGE_KEY: &str = "redicoin_contacts";
/// Starting balance for a fresh session.
pub const DEFAULT_INITIAL_BALANCE: f64 = 1000.0;
/// How long the presentation layer should show a notification.
pub const DEFAULT_NOTIFICATION_DISPLAY_MS: u64 = 3000;

/// Settings read once when a wallet session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Must be finite and non-negative.
    pub initial_balance: f64,
    pub storage_key: String,
    /// Display hint forwarded to the UI; the core never times anything.
    pub notification_display_ms: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            storage_key: CONTACTS_STORAGE_KEY.to_string(),
            notification_display_ms: DEFAULT_NOTIFICATION_DISPLAY_MS,
        }
    }
}

impl WalletConfig {
    pub fn with_initial_balance(mut self, initial_balance: f64) -> Self {
        self.initial_balance = initial_balance;
        self
    }

    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }
}
