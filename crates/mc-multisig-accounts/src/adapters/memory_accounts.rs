//! # In-Memory Account Store
//!
//! `AccountStore` implementation backed by a hash map. Used by the node
//! runtime wiring for single-node operation and by the test suites. A
//! failure switch lets tests exercise the store-failure paths without a
//! real database.

use crate::ports::outbound::{AccountCriteria, AccountStore, AccountStoreError};
use async_trait::async_trait;
use shared_types::entities::{Account, Address};
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

/// In-memory account records keyed by address.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Address, Account>>,
    /// `Some(n)`: allow `n` more successful calls, then fail every call.
    remaining_ok: Mutex<Option<u32>>,
}

impl InMemoryAccountStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account record, replacing any previous entry at the same
    /// address.
    pub fn insert(&self, account: Account) {
        self.accounts
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(account.address, account);
    }

    /// Make every store call after the next `calls` successful ones fail.
    ///
    /// `fail_after(0)` fails immediately. Used to exercise the
    /// `AccountLookupFailed` and query-atomicity paths.
    pub fn fail_after(&self, calls: u32) {
        *self.remaining_ok.lock().unwrap_or_else(|e| e.into_inner()) = Some(calls);
    }

    fn charge(&self) -> Result<(), AccountStoreError> {
        let mut remaining = self.remaining_ok.lock().unwrap_or_else(|e| e.into_inner());
        match remaining.as_mut() {
            None => Ok(()),
            Some(0) => Err(AccountStoreError::Database("injected store failure".into())),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn get_by_address(
        &self,
        address: &Address,
    ) -> Result<Option<Account>, AccountStoreError> {
        self.charge()?;
        Ok(self
            .accounts
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(address)
            .cloned())
    }

    async fn get_many(
        &self,
        criteria: AccountCriteria,
    ) -> Result<Vec<Account>, AccountStoreError> {
        self.charge()?;
        let accounts = self.accounts.read().unwrap_or_else(|e| e.into_inner());
        let mut matched: Vec<Account> = match criteria {
            AccountCriteria::Addresses(addresses) => addresses
                .iter()
                .filter_map(|address| accounts.get(address).cloned())
                .collect(),
            AccountCriteria::KeysgroupContains(public_key) => accounts
                .values()
                .filter(|account| account.multisignatures.contains(&public_key))
                .cloned()
                .collect(),
        };
        matched.sort_by(|a, b| b.balance.cmp(&a.balance).then(a.address.cmp(&b.address)));
        Ok(matched)
    }
}
