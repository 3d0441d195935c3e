//! # Verification Dispatch
//!
//! Wraps the injected cryptographic verify capability and implements the
//! per-candidate resolution loop used by signature processing.

use crate::domain::errors::{CryptoFault, MultisigError};
use crate::ports::outbound::CryptoVerifier;
use shared_types::entities::{PublicKey, Signature};
use std::sync::Arc;
use tracing::error;

/// Outcome of a single verification attempt.
///
/// Verification is a result, not exception control flow: a cleanly-invalid
/// signature (`Invalid`) and a verifier that could not complete (`Fault`)
/// take different branches in the candidate loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The signature is a valid signature by the candidate key.
    Valid,
    /// The signature is cryptographically invalid for the candidate key.
    Invalid,
    /// The verify capability itself failed.
    Fault(CryptoFault),
}

/// Thin wrapper around the injected cryptographic verify capability.
///
/// A fault from the capability never escapes as an uncaught error: it is
/// logged with full detail and surfaced as a typed outcome.
#[derive(Clone)]
pub struct SignatureVerifier {
    crypto: Arc<dyn CryptoVerifier>,
}

impl SignatureVerifier {
    /// Wrap a cryptographic verify capability.
    pub fn new(crypto: Arc<dyn CryptoVerifier>) -> Self {
        Self { crypto }
    }

    /// Verify `signature` by `candidate` over `message`.
    pub fn check(
        &self,
        candidate: &PublicKey,
        signature: &Signature,
        message: &[u8],
    ) -> VerifyOutcome {
        match self.crypto.verify(candidate, signature, message) {
            Ok(true) => VerifyOutcome::Valid,
            Ok(false) => VerifyOutcome::Invalid,
            Err(fault) => {
                error!(%fault, candidate = ?&candidate[..4], "Signature verifier fault");
                VerifyOutcome::Fault(fault)
            }
        }
    }

    /// Resolve which candidate key produced `signature`.
    ///
    /// Candidates are tried in stored order. The first key that validates
    /// resolves the signer and ends the loop, so a signature is never
    /// attributed to two keyholders. An `Invalid` outcome advances to the
    /// next candidate; a `Fault` aborts the whole attempt immediately and
    /// remaining candidates are not tried. Exhausting all candidates is a
    /// verification failure.
    pub fn resolve_signer(
        &self,
        candidates: &[PublicKey],
        signature: &Signature,
        message: &[u8],
    ) -> Result<PublicKey, MultisigError> {
        for candidate in candidates {
            match self.check(candidate, signature, message) {
                VerifyOutcome::Valid => return Ok(*candidate),
                VerifyOutcome::Invalid => continue,
                VerifyOutcome::Fault(_) => return Err(MultisigError::VerificationFailure),
            }
        }
        Err(MultisigError::VerificationFailure)
    }
}
