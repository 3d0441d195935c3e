//! # Core Domain Entities
//!
//! Defines the entities that cross the boundary between the multisignature
//! subsystem and its collaborators.
//!
//! ## Clusters
//!
//! - **Primitives**: `Hash`, `Signature`, `PublicKey`, `Address`,
//!   `TransactionId`
//! - **Accounts**: `Account` (owned by the accounts module)
//! - **Transactions**: `PendingTransaction`, `TransactionKind`,
//!   `MultisigRegistration` (owned by the transaction pool)
//! - **Requests**: `SignaturePacket` (transient input to signature
//!   processing)

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha2::{Digest, Sha256};

// =============================================================================
// PRIMITIVES
// =============================================================================

/// A 32-byte SHA-256 hash.
pub type Hash = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// A 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// A 20-byte account address, derived from the owner's public key.
pub type Address = [u8; 20];

/// A transaction identifier (hash of the signable payload).
pub type TransactionId = Hash;

/// Derive an account address from a public key.
///
/// The address is the last 20 bytes of `SHA-256(public_key)`. Derivation is
/// deterministic, so any module can resolve a keysgroup member's address
/// without a database round trip.
#[must_use]
pub fn address_from_public_key(public_key: &PublicKey) -> Address {
    let digest = Sha256::digest(public_key);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    address
}

// =============================================================================
// ACCOUNTS
// =============================================================================

/// An account record as stored by the accounts module.
///
/// The multisignature fields describe the account's keysgroup once a
/// registration has been applied: `multisignatures` is the ordered set of
/// co-signing public keys (empty for a regular account), `multimin` the
/// number of distinct valid signatures required to authorize an action, and
/// `multilifetime` the number of hours a pending transaction may wait for
/// quorum before an external sweeper expires it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    /// Unique account address.
    pub address: Address,
    /// Owner public key. Unknown until the account's first outgoing
    /// transaction is applied.
    pub public_key: Option<PublicKey>,
    /// Balance in base units.
    pub balance: u64,
    /// Ordered keysgroup. Empty if the account is not a multisignature
    /// account. Invariant once converted: `multimin as usize <= len()`.
    pub multisignatures: Vec<PublicKey>,
    /// Minimum number of distinct valid signatures for authorization.
    pub multimin: u32,
    /// Pending-transaction lifetime in hours. Advisory only.
    pub multilifetime: u32,
}

impl Account {
    /// Whether a multisignature conversion has been applied to this account.
    #[must_use]
    pub fn is_multisig(&self) -> bool {
        !self.multisignatures.is_empty()
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Candidate keysgroup and threshold carried by a registration transaction.
///
/// Until the registration is applied, these values exist only in the
/// transaction payload; the sender's `Account` record does not carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigRegistration {
    /// Candidate co-signing public keys, in signing order.
    pub keysgroup: Vec<PublicKey>,
    /// Candidate signature threshold.
    pub min: u32,
    /// Candidate pending-transaction lifetime in hours.
    pub lifetime: u32,
}

/// The kind of a pending transaction.
///
/// A closed set: signature processing branches exhaustively on this, so a
/// new kind cannot be added without the compiler pointing at every place
/// that must handle it. The registration payload lives inside its variant,
/// so a registration transaction without a candidate keysgroup is
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Converts the sender into a multisignature account. Carries the
    /// candidate keysgroup and threshold in its own payload.
    RegisterMultisig(MultisigRegistration),
    /// An ordinary balance transfer.
    Transfer,
    /// Any other transaction kind; treated like `Transfer` for signature
    /// collection.
    Other,
}

/// A transaction held by the pool while it waits for signatures.
///
/// `signatures` is the ordered sequence of co-signatures accepted so far.
/// Only successful signature-processing runs append to it; the pool owns
/// every other mutation.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTransaction {
    /// Transaction id (hash of the signable payload).
    pub id: TransactionId,
    /// Sender's address.
    pub sender_address: Address,
    /// Sender's public key.
    pub sender_public_key: PublicKey,
    /// Transaction kind, with the registration payload when applicable.
    pub kind: TransactionKind,
    /// Transfer amount in base units.
    pub amount: u64,
    /// Unix timestamp at creation.
    pub timestamp: u64,
    /// Co-signatures accepted so far, in arrival order.
    #[serde_as(as = "Vec<Bytes>")]
    pub signatures: Vec<Signature>,
}

impl PendingTransaction {
    /// Hash of the canonical signable payload.
    ///
    /// Covers every field except `signatures`: co-signatures attest to the
    /// transaction content, not to each other, so accepting one must not
    /// change what the next keyholder signs.
    #[must_use]
    pub fn signable_hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.sender_address);
        hasher.update(self.sender_public_key);
        match &self.kind {
            TransactionKind::RegisterMultisig(reg) => {
                hasher.update([0u8]);
                hasher.update((reg.keysgroup.len() as u32).to_le_bytes());
                for key in &reg.keysgroup {
                    hasher.update(key);
                }
                hasher.update(reg.min.to_le_bytes());
                hasher.update(reg.lifetime.to_le_bytes());
            }
            TransactionKind::Transfer => hasher.update([1u8]),
            TransactionKind::Other => hasher.update([2u8]),
        }
        hasher.update(self.amount.to_le_bytes());
        hasher.update(self.timestamp.to_le_bytes());
        hasher.finalize().into()
    }

    /// Whether `signature` has already been accepted for this transaction.
    #[must_use]
    pub fn has_signature(&self, signature: &Signature) -> bool {
        self.signatures.iter().any(|s| s == signature)
    }

    /// The candidate registration payload, if this is a registration
    /// transaction.
    #[must_use]
    pub fn registration(&self) -> Option<&MultisigRegistration> {
        match &self.kind {
            TransactionKind::RegisterMultisig(reg) => Some(reg),
            _ => None,
        }
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Transient input to signature processing: one incoming co-signature.
///
/// The signer's identity is deliberately absent: it is determined by which
/// candidate public key the signature verifies against. Both fields are
/// optional because the wire layer may hand over an empty request; the
/// processor rejects that case explicitly rather than panicking.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignaturePacket {
    /// Id of the pending transaction being co-signed.
    pub transaction: Option<TransactionId>,
    /// The raw signature bytes.
    #[serde_as(as = "Option<Bytes>")]
    pub signature: Option<Signature>,
}

impl SignaturePacket {
    /// Build a packet for `transaction` carrying `signature`.
    #[must_use]
    pub fn new(transaction: TransactionId, signature: Signature) -> Self {
        Self {
            transaction: Some(transaction),
            signature: Some(signature),
        }
    }
}
