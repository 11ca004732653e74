//! Injectable identity generators.
//!
//! # Responsibility
//! - Issue contact ids (`IdSource`) and display-only hex tokens
//!   (`TokenSource`) behind traits so tests can pin exact sequences.
//!
//! # Invariants
//! - `ClockIdSource` never returns the same id twice within a process.
//! - Tokens are lowercase hex and carry no cryptographic meaning.

use crate::model::contact::ContactId;
use std::collections::VecDeque;
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Number of hex digits in a session wallet address (after `0x`).
pub const WALLET_ADDRESS_HEX_DIGITS: usize = 40;

/// Source of new contact ids.
pub trait IdSource: Send {
    fn next_id(&mut self) -> ContactId;
}

/// Source of pseudo-random hex tokens.
pub trait TokenSource: Send {
    /// Returns exactly `digits` lowercase hex characters.
    fn hex_token(&mut self, digits: usize) -> String;
}

/// Clock-based ids: epoch milliseconds, bumped to stay strictly increasing.
#[derive(Debug, Default)]
pub struct ClockIdSource {
    last: ContactId,
}

impl ClockIdSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for ClockIdSource {
    fn next_id(&mut self) -> ContactId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| ContactId::try_from(elapsed.as_millis()).unwrap_or(ContactId::MAX))
            .unwrap_or(0);
        self.last = now.max(self.last.saturating_add(1));
        self.last
    }
}

/// Hex tokens with every digit drawn independently from the thread RNG.
#[derive(Debug, Default)]
pub struct RandomHexSource;

impl TokenSource for RandomHexSource {
    fn hex_token(&mut self, digits: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..digits)
            .filter_map(|_| char::from_digit(rng.gen_range(0..16), 16))
            .collect()
    }
}

/// Deterministic ids for tests: yields queued values, then counts upward.
#[derive(Debug, Clone)]
pub struct SequenceIdSource {
    queued: VecDeque<ContactId>,
    next: ContactId,
}

impl SequenceIdSource {
    /// Counts upward from `start`.
    pub fn starting_at(start: ContactId) -> Self {
        Self {
            queued: VecDeque::new(),
            next: start,
        }
    }

    /// Yields `ids` in order, then continues from the last one plus one.
    pub fn from_ids(ids: impl IntoIterator<Item = ContactId>) -> Self {
        let queued = ids.into_iter().collect::<VecDeque<_>>();
        let next = queued.back().map_or(1, |last| last.saturating_add(1));
        Self { queued, next }
    }
}

impl IdSource for SequenceIdSource {
    fn next_id(&mut self) -> ContactId {
        if let Some(id) = self.queued.pop_front() {
            return id;
        }
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Deterministic token source: repeats one hex pattern to the requested length.
#[derive(Debug, Clone)]
pub struct FixedTokenSource {
    pattern: String,
}

impl FixedTokenSource {
    /// Non-hex characters are dropped; an empty pattern falls back to `0`.
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern
            .into()
            .chars()
            .filter(char::is_ascii_hexdigit)
            .map(|c| c.to_ascii_lowercase())
            .collect::<String>();
        let pattern = if pattern.is_empty() {
            "0".to_string()
        } else {
            pattern
        };
        Self { pattern }
    }
}

impl TokenSource for FixedTokenSource {
    fn hex_token(&mut self, digits: usize) -> String {
        self.pattern.chars().cycle().take(digits).collect()
    }
}

/// Formats a session wallet address from a token source.
pub fn wallet_address(tokens: &mut dyn TokenSource) -> String {
    format!("0x{}", tokens.hex_token(WALLET_ADDRESS_HEX_DIGITS))
}

#[cfg(test)]
mod tests {
    use super::{
        wallet_address, ClockIdSource, FixedTokenSource, IdSource, RandomHexSource,
        SequenceIdSource, TokenSource,
    };
    use std::collections::HashSet;

    #[test]
    fn clock_ids_strictly_increase() {
        let mut ids = ClockIdSource::new();
        let first = ids.next_id();
        let second = ids.next_id();
        let third = ids.next_id();
        assert!(first < second && second < third);
    }

    #[test]
    fn random_tokens_have_requested_length_and_alphabet() {
        let token = RandomHexSource.hex_token(40);
        assert_eq!(token.len(), 40);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn random_tokens_have_no_fixed_positions() {
        let tokens = (0..200)
            .map(|_| RandomHexSource.hex_token(40))
            .collect::<Vec<_>>();

        for position in 0..40 {
            let distinct = tokens
                .iter()
                .filter_map(|token| token.as_bytes().get(position).copied())
                .collect::<HashSet<_>>();
            assert!(distinct.len() > 1, "digit {position} never varies");
        }
        assert!(tokens.iter().any(|token| &token[12..13] != "4"));
        assert!(tokens
            .iter()
            .any(|token| !matches!(&token[16..17], "8" | "9" | "a" | "b")));
    }

    #[test]
    fn wallet_address_is_prefixed_forty_digits() {
        let address = wallet_address(&mut FixedTokenSource::new("ab"));
        assert_eq!(address.len(), 42);
        assert!(address.starts_with("0xabab"));
    }

    #[test]
    fn sequence_source_drains_queue_then_counts() {
        let mut ids = SequenceIdSource::from_ids([7, 3]);
        assert_eq!(ids.next_id(), 7);
        assert_eq!(ids.next_id(), 3);
        assert_eq!(ids.next_id(), 4);
    }
}
