//! # Keyed Sequencer
//!
//! Per-transaction-id mutual exclusion for signature processing.
//!
//! Two signatures for the same pending transaction must not interleave
//! between the duplicate check and the signature append, or both could pass
//! the check and corrupt the count readiness is computed from. Signatures
//! for different transactions have no shared state and proceed in parallel.

use shared_types::entities::TransactionId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A keyed async mutex: one lock per transaction id.
///
/// The guard returned by [`acquire`](Self::acquire) is held across await
/// points for the duration of the fetch → duplicate-check → verify → append
/// critical section, making the serialization contract visible at the call
/// site instead of being an ambient queue.
#[derive(Default)]
pub struct KeyedSequencer {
    locks: StdMutex<HashMap<TransactionId, Arc<Mutex<()>>>>,
}

impl KeyedSequencer {
    /// Create an empty sequencer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `id`, waiting if another task holds it.
    pub async fn acquire(&self, id: &TransactionId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // Drop entries nobody is waiting on; the map stays bounded by
            // the number of transactions currently being signed.
            locks.retain(|_, l| Arc::strong_count(l) > 1);
            Arc::clone(locks.entry(*id).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of transaction ids currently tracked.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
