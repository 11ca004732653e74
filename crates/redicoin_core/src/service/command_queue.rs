//! Serialized mutation queue over one dispatcher.
//!
//! Multi-source callers (UI threads, FFI) submit commands here; the mutex
//! guarantees each command runs to completion before the next starts.

use crate::service::command::{CommandReply, WalletCommand, WalletSnapshot};
use crate::service::wallet_dispatcher::WalletDispatcher;
use crate::store::KeyValueStore;
use log::warn;
use std::sync::{Mutex, MutexGuard};

pub struct CommandQueue<S: KeyValueStore> {
    dispatcher: Mutex<WalletDispatcher<S>>,
}

impl<S: KeyValueStore> CommandQueue<S> {
    pub fn new(dispatcher: WalletDispatcher<S>) -> Self {
        Self {
            dispatcher: Mutex::new(dispatcher),
        }
    }

    /// Runs one command after every previously submitted one.
    pub fn submit(&self, command: WalletCommand) -> CommandReply {
        self.lock().dispatch(command)
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        self.lock().snapshot()
    }

    /// Read-only access for queries that are not commands.
    pub fn inspect<T>(&self, f: impl FnOnce(&WalletDispatcher<S>) -> T) -> T {
        let guard = self.lock();
        f(&*guard)
    }

    fn lock(&self) -> MutexGuard<'_, WalletDispatcher<S>> {
        // Commands leave no partial state, so a poisoned guard is still consistent.
        self.dispatcher.lock().unwrap_or_else(|poisoned| {
            warn!("event=command_queue module=service status=recovered reason=poisoned_lock");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::CommandQueue;
    use crate::config::WalletConfig;
    use crate::service::command::{CommandOutput, WalletCommand};
    use crate::service::wallet_dispatcher::WalletDispatcher;
    use crate::store::memory::MemoryKeyValueStore;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn concurrent_stakes_never_overdraw() {
        let dispatcher =
            WalletDispatcher::start(WalletConfig::default(), MemoryKeyValueStore::new()).unwrap();
        let queue = Arc::new(CommandQueue::new(dispatcher));

        let handles = (0..8)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    (0..5)
                        .filter(|_| {
                            let reply = queue.submit(WalletCommand::Stake { amount: 30.0 });
                            matches!(reply.result, Ok(CommandOutput::Staked { .. }))
                        })
                        .count()
                })
            })
            .collect::<Vec<_>>();

        let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        let balance = queue.snapshot().balance;
        assert_eq!(accepted, 33);
        assert!(balance >= 0.0);
        assert_eq!(balance, 1000.0 - 30.0 * accepted as f64);
    }
}
