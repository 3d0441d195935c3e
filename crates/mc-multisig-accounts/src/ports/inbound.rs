//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::entities::{AddressFilter, GroupView, MembershipView};
use crate::domain::errors::MultisigError;
use async_trait::async_trait;
use shared_types::entities::{Address, SignaturePacket};

/// Primary Multisignature API.
///
/// This is the main entry point for signature collection and group
/// resolution. Implementations must be thread-safe (`Send + Sync`);
/// concurrent calls for different transactions proceed independently.
#[async_trait]
pub trait MultisigApi: Send + Sync {
    /// Process one incoming co-signature for a pending transaction.
    ///
    /// Verifies the signature against the applicable keysgroup, appends it
    /// to the transaction, and publishes a signature-accepted event carrying
    /// the readiness flag. Success has no payload; every failure is a typed
    /// [`MultisigError`].
    async fn process_signature(&self, packet: SignaturePacket) -> Result<(), MultisigError>;

    /// Resolve one account's multisignature topology.
    ///
    /// # Errors
    /// - `AccountNotFound` - no account at `address`
    /// - `NotMultisignatureAccount` - the account has an empty keysgroup
    async fn get_group(&self, address: Address) -> Result<GroupView, MultisigError>;

    /// Resolve the multisignature groups for a filtered set of addresses,
    /// including the resolved identities of every keysgroup member.
    ///
    /// Any store failure at either resolution stage aborts the whole query;
    /// no partial results are returned.
    async fn get_groups(&self, filter: AddressFilter) -> Result<Vec<GroupView>, MultisigError>;

    /// Resolve the groups each filtered address is itself a member of.
    ///
    /// Same two-level resolution and atomicity as [`Self::get_groups`].
    async fn get_memberships(
        &self,
        filter: AddressFilter,
    ) -> Result<Vec<MembershipView>, MultisigError>;
}
