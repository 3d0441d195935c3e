//! # Multisignature Errors
//!
//! Error types for signature processing and group queries.

use thiserror::Error;

/// Errors surfaced by the multisignature subsystem.
///
/// Every failure is detected at its point of occurrence and returned
/// synchronously to the caller; the subsystem performs no local recovery or
/// retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MultisigError {
    /// No signature or transaction reference was supplied.
    #[error("Unable to process signature. Signature is undefined.")]
    MissingSignature,

    /// The referenced pending transaction does not exist in the pool.
    #[error("Transaction not found")]
    TransactionNotFound,

    /// The underlying account store call failed (I/O or infrastructure).
    #[error("Account lookup failed: {0}")]
    AccountLookupFailed(String),

    /// The account does not exist, or is not a multisignature account where
    /// one is required.
    #[error("Account not found")]
    AccountNotFound,

    /// The signature was already recorded for this transaction.
    #[error("Signature already exists")]
    DuplicateSignature,

    /// The account or transaction state forbids signing (completed
    /// registration, or a replayed registration co-signature).
    #[error("Permission to sign transaction denied")]
    PermissionDenied,

    /// No candidate key validated the signature, or the verifier faulted.
    #[error("Failed to verify signature")]
    VerificationFailure,

    /// The query target account has an empty keysgroup.
    #[error("Account is not a multisignature account")]
    NotMultisignatureAccount,

    /// Malformed filter input to a group query.
    #[error("Invalid query: {0}")]
    SchemaOrQuery(String),
}

/// A fault raised by the cryptographic verify capability.
///
/// Distinct from a cleanly-invalid signature: a fault means the verifier
/// itself could not complete (malformed inputs, backend failure), and the
/// candidate loop must abort rather than try further keys.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoFault {
    /// The candidate public key is not a valid curve point.
    #[error("Malformed public key")]
    MalformedKey,

    /// The signature bytes are structurally invalid.
    #[error("Malformed signature")]
    MalformedSignature,

    /// The verification backend failed internally.
    #[error("Verifier backend error: {0}")]
    Backend(String),
}
