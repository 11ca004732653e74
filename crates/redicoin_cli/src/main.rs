//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `redicoin_core` linkage without the Flutter/FFI runtime.
//! - Print a deterministic summary of a fresh in-memory session.

use redicoin_core::{MemoryKeyValueStore, WalletConfig, WalletDispatcher};

fn main() {
    println!("redicoin_core ping={}", redicoin_core::ping());
    println!("redicoin_core version={}", redicoin_core::core_version());

    match WalletDispatcher::start(WalletConfig::default(), MemoryKeyValueStore::new()) {
        Ok(session) => {
            let snapshot = session.snapshot();
            println!(
                "session balance={} contacts={} workflow={}",
                snapshot.balance,
                snapshot.contacts.len(),
                snapshot.workflow
            );
        }
        Err(err) => {
            eprintln!("session start failed: {err}");
            std::process::exit(1);
        }
    }
}
