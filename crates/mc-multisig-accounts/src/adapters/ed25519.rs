//! # Ed25519 Verifier Adapter
//!
//! Implements the cryptographic verify capability over the chain's Ed25519
//! signature scheme.

use crate::domain::errors::CryptoFault;
use crate::ports::outbound::CryptoVerifier;
use ed25519_dalek::{Verifier, VerifyingKey};
use shared_types::entities::{PublicKey, Signature};

/// Ed25519 implementation of [`CryptoVerifier`].
///
/// A public key that is not a valid curve point is a fault, not an invalid
/// signature: the candidate loop must abort on it rather than silently skip
/// the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl Ed25519Verifier {
    /// Create a new verifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CryptoVerifier for Ed25519Verifier {
    fn verify(
        &self,
        public_key: &PublicKey,
        signature: &Signature,
        message: &[u8],
    ) -> Result<bool, CryptoFault> {
        let verifying_key =
            VerifyingKey::from_bytes(public_key).map_err(|_| CryptoFault::MalformedKey)?;
        let sig = ed25519_dalek::Signature::from_bytes(signature);
        Ok(verifying_key.verify(message, &sig).is_ok())
    }
}
