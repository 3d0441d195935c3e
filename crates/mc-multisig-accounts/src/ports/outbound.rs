//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits that define the collaborators this subsystem depends on: the
//! transaction pool, the account store, and the cryptographic verify
//! capability.

use crate::domain::errors::CryptoFault;
use async_trait::async_trait;
use shared_types::entities::{
    Account, Address, PendingTransaction, PublicKey, Signature, TransactionId,
};
use thiserror::Error;

/// Error from transaction-pool operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PoolError {
    /// The transaction left the pool between lookup and mutation.
    #[error("Transaction not found in pool")]
    TransactionNotFound,
}

/// Error from account-store operations.
///
/// The store is database-backed; any of its calls can fail on
/// infrastructure grounds independent of whether the account exists.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountStoreError {
    /// The underlying database call failed.
    #[error("Account store error: {0}")]
    Database(String),
}

/// Selection criteria for batched account lookups.
#[derive(Debug, Clone)]
pub enum AccountCriteria {
    /// Accounts with one of the given addresses.
    Addresses(Vec<Address>),
    /// Accounts whose keysgroup contains the given public key.
    KeysgroupContains(PublicKey),
}

/// Gateway to the transaction pool holding multisignature transactions
/// awaiting quorum.
///
/// The pool owns the records; this subsystem only reads them and appends
/// accepted signatures. `append_signature` must be invoked only under the
/// per-transaction sequencer guard so the duplicate check it follows and
/// the append itself form one atomic step.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Fetch the pending transaction with the given id, if present.
    async fn get_pending(&self, id: &TransactionId) -> Option<PendingTransaction>;

    /// Append an accepted signature and return the updated transaction.
    async fn append_signature(
        &self,
        id: &TransactionId,
        signature: Signature,
    ) -> Result<PendingTransaction, PoolError>;
}

/// Gateway to the accounts module.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fetch the account at `address`, if one exists.
    async fn get_by_address(&self, address: &Address)
        -> Result<Option<Account>, AccountStoreError>;

    /// Fetch every account matching `criteria`, ordered by descending
    /// balance.
    async fn get_many(&self, criteria: AccountCriteria)
        -> Result<Vec<Account>, AccountStoreError>;
}

/// The injected cryptographic verify capability.
///
/// Returns `Ok(true)` for a valid signature, `Ok(false)` for a
/// cryptographically invalid one, and `Err` when verification itself cannot
/// complete (malformed key or signature, backend failure). CPU-bound and
/// synchronous; it holds no lock and may briefly block the calling task.
pub trait CryptoVerifier: Send + Sync {
    /// Verify `signature` by `public_key` over `message`.
    fn verify(
        &self,
        public_key: &PublicKey,
        signature: &Signature,
        message: &[u8],
    ) -> Result<bool, CryptoFault>;
}
