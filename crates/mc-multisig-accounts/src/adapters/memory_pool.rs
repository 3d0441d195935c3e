//! # In-Memory Transaction Pool
//!
//! `TransactionStore` implementation backed by a hash map. Used by the node
//! runtime wiring for single-node operation and by the test suites.

use crate::ports::outbound::{PoolError, TransactionStore};
use async_trait::async_trait;
use shared_types::entities::{PendingTransaction, Signature, TransactionId};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory pool of multisignature transactions awaiting quorum.
#[derive(Default)]
pub struct InMemoryTransactionPool {
    transactions: RwLock<HashMap<TransactionId, PendingTransaction>>,
}

impl InMemoryTransactionPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pending transaction, replacing any previous entry with the
    /// same id.
    pub fn insert(&self, transaction: PendingTransaction) {
        self.transactions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(transaction.id, transaction);
    }

    /// Number of transactions currently pending.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionPool {
    async fn get_pending(&self, id: &TransactionId) -> Option<PendingTransaction> {
        self.transactions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    async fn append_signature(
        &self,
        id: &TransactionId,
        signature: Signature,
    ) -> Result<PendingTransaction, PoolError> {
        let mut transactions = self.transactions.write().unwrap_or_else(|e| e.into_inner());
        let transaction = transactions
            .get_mut(id)
            .ok_or(PoolError::TransactionNotFound)?;
        transaction.signatures.push(signature);
        Ok(transaction.clone())
    }
}
