//! Single-slot transient notification channel.
//!
//! # Responsibility
//! - Hold the message describing the outcome of the last command.
//!
//! # Invariants
//! - At most one notification is live; a new one replaces it.
//! - Clearing is driven by the presentation layer's display timer.

use serde::{Deserialize, Serialize};

pub mod messages;

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationChannel {
    slot: Option<Notification>,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a visible notification, replacing any pending one.
    pub fn emit(&mut self, message: impl Into<String>) {
        self.slot = Some(Notification {
            message: message.into(),
            visible: true,
        });
    }

    pub fn current(&self) -> Option<&Notification> {
        self.slot.as_ref()
    }

    /// Clears the slot and returns what was there.
    pub fn dismiss(&mut self) -> Option<Notification> {
        self.slot.take()
    }
}

#[cfg(test)]
mod tests {
    use super::NotificationChannel;

    #[test]
    fn last_write_wins() {
        let mut channel = NotificationChannel::new();
        channel.emit("first");
        channel.emit("second");

        let current = channel.current().unwrap();
        assert_eq!(current.message, "second");
        assert!(current.visible);
    }

    #[test]
    fn dismiss_empties_slot() {
        let mut channel = NotificationChannel::new();
        channel.emit("hello");
        assert_eq!(channel.dismiss().unwrap().message, "hello");
        assert!(channel.current().is_none());
        assert!(channel.dismiss().is_none());
    }
}
