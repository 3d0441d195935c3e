//! # Readiness Evaluation
//!
//! Decides whether a pending transaction has accumulated enough distinct
//! signatures to meet its threshold.

use shared_types::entities::{Account, PendingTransaction};
use std::collections::BTreeSet;

/// Whether `transaction` has reached quorum.
///
/// The applicable threshold depends on the transaction kind: a registration
/// transaction is measured against the candidate `min` carried in its own
/// payload (the sender account has no keysgroup yet), anything else against
/// the sender account's `multimin`.
///
/// Pure function of its inputs; authorization stays deterministic across
/// retries.
#[must_use]
pub fn is_ready(transaction: &PendingTransaction, account: &Account) -> bool {
    let threshold = match transaction.registration() {
        Some(reg) => reg.min,
        None => account.multimin,
    };
    distinct_signature_count(transaction) >= threshold as usize
}

/// Number of distinct signature values recorded on the transaction.
///
/// The pool never stores the same raw signature twice, but the count is
/// deduplicated anyway so a corrupt pool cannot inflate the tally.
#[must_use]
pub fn distinct_signature_count(transaction: &PendingTransaction) -> usize {
    transaction
        .signatures
        .iter()
        .collect::<BTreeSet<_>>()
        .len()
}
