//! # Domain Entities
//!
//! Query views and request types for group resolution.

use crate::domain::errors::MultisigError;
use serde::{Deserialize, Serialize};
use shared_types::entities::{Account, Address, PublicKey};

/// A resolved keysgroup member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    /// The member's derived address.
    pub address: Address,
    /// The member's public key, if an account record exists for it.
    pub public_key: Option<PublicKey>,
    /// The member's balance in base units.
    pub balance: u64,
    /// Whether the member account is itself a multisignature account.
    pub in_multisig: bool,
}

impl GroupMember {
    /// Build a member entry from a resolved account record.
    #[must_use]
    pub fn from_account(account: &Account) -> Self {
        Self {
            address: account.address,
            public_key: account.public_key,
            balance: account.balance,
            in_multisig: account.is_multisig(),
        }
    }

    /// Build a placeholder entry for a keysgroup key with no stored account.
    ///
    /// The accounts module creates records lazily, so a registered co-signer
    /// may not have one yet; the group view still lists the derived address.
    #[must_use]
    pub fn unresolved(public_key: PublicKey) -> Self {
        Self {
            address: shared_types::entities::address_from_public_key(&public_key),
            public_key: Some(public_key),
            balance: 0,
            in_multisig: false,
        }
    }
}

/// The multisignature topology of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    /// The group account's address.
    pub address: Address,
    /// The group account's balance in base units.
    pub balance: u64,
    /// Signature threshold (`multimin`).
    pub min: u32,
    /// Pending-transaction lifetime in hours (`multilifetime`, advisory).
    pub lifetime: u32,
    /// Resolved keysgroup members, in keysgroup order.
    pub members: Vec<GroupMember>,
}

/// The groups an address belongs to.
///
/// Same shape as [`GroupView`]: the outer accounts are the groups of which
/// the queried address is a keysgroup member.
pub type MembershipView = GroupView;

/// Address filter for the batched group queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressFilter {
    /// Addresses to resolve.
    pub addresses: Vec<Address>,
}

impl AddressFilter {
    /// Filter for a single address.
    #[must_use]
    pub fn one(address: Address) -> Self {
        Self {
            addresses: vec![address],
        }
    }

    /// Validate the filter before it drives any store access.
    ///
    /// An empty filter is the malformed-input case the wire layer's schema
    /// validation would normally catch; it is rejected here as well so the
    /// query boundary never fans out over an unbounded account scan.
    pub fn validate(&self) -> Result<(), MultisigError> {
        if self.addresses.is_empty() {
            return Err(MultisigError::SchemaOrQuery(
                "address filter must not be empty".into(),
            ));
        }
        Ok(())
    }
}
