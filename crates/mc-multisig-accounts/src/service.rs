//! # Multisignature Service
//!
//! Application service layer that implements the `MultisigApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`MultisigApi`)
//! - Uses the outbound ports (`TransactionStore`, `AccountStore`,
//!   `CryptoVerifier` via `SignatureVerifier`) for collaborator access
//! - Publishes accepted signatures to the shared event bus
//!
//! All collaborators are held in this explicit context struct; there is no
//! process-wide mutable state.

use crate::domain::entities::{AddressFilter, GroupMember, GroupView, MembershipView};
use crate::domain::errors::MultisigError;
use crate::domain::readiness::is_ready;
use crate::domain::verify::SignatureVerifier;
use crate::ports::inbound::MultisigApi;
use crate::ports::outbound::{AccountCriteria, AccountStore, CryptoVerifier, TransactionStore};
use crate::sequencer::KeyedSequencer;
use async_trait::async_trait;
use shared_bus::events::LedgerEvent;
use shared_bus::publisher::EventPublisher;
use shared_types::entities::{
    address_from_public_key, Account, Address, PublicKey, SignaturePacket, TransactionKind,
};
use std::sync::Arc;
use tracing::{debug, error};

/// Multisignature Service.
///
/// One instance serves the whole node; per-request state lives on the
/// stack. Mutating work for a given transaction id is serialized through
/// the keyed sequencer, so duplicate detection and the signature append
/// form one atomic step per transaction.
pub struct MultisigService {
    transactions: Arc<dyn TransactionStore>,
    accounts: Arc<dyn AccountStore>,
    verifier: SignatureVerifier,
    bus: Arc<dyn EventPublisher>,
    sequencer: KeyedSequencer,
}

impl MultisigService {
    /// Create a new service over its collaborators.
    pub fn new(
        transactions: Arc<dyn TransactionStore>,
        accounts: Arc<dyn AccountStore>,
        crypto: Arc<dyn CryptoVerifier>,
        bus: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            transactions,
            accounts,
            verifier: SignatureVerifier::new(crypto),
            bus,
            sequencer: KeyedSequencer::new(),
        }
    }

    /// Load the account at `address`, mapping store failures and absence to
    /// their respective error kinds.
    async fn load_account(&self, address: &Address) -> Result<Account, MultisigError> {
        match self.accounts.get_by_address(address).await {
            Ok(Some(account)) => Ok(account),
            Ok(None) => Err(MultisigError::AccountNotFound),
            Err(err) => {
                error!(%err, address = ?&address[..4], "Account lookup failed");
                Err(MultisigError::AccountLookupFailed(err.to_string()))
            }
        }
    }

    /// Resolve each keysgroup key to its owning account.
    ///
    /// One batched lookup for the whole keysgroup; entries come back in
    /// keysgroup order. A key with no stored account resolves to its
    /// derived address with zero balance; the accounts module creates
    /// records lazily.
    async fn resolve_members(
        &self,
        keysgroup: &[PublicKey],
    ) -> Result<Vec<GroupMember>, MultisigError> {
        let addresses: Vec<Address> = keysgroup.iter().map(address_from_public_key).collect();
        let fetched = self
            .accounts
            .get_many(AccountCriteria::Addresses(addresses.clone()))
            .await
            .map_err(|err| {
                error!(%err, "Member resolution failed");
                MultisigError::AccountLookupFailed(err.to_string())
            })?;

        let members = keysgroup
            .iter()
            .zip(addresses)
            .map(|(key, address)| {
                match fetched.iter().find(|account| account.address == address) {
                    Some(account) => {
                        let mut member = GroupMember::from_account(account);
                        // The store may not have seen the member transact
                        // yet; the keysgroup still knows its public key.
                        member.public_key.get_or_insert(*key);
                        member
                    }
                    None => GroupMember::unresolved(*key),
                }
            })
            .collect();
        Ok(members)
    }

    /// Build the two-level view for one multisignature account.
    async fn build_group_view(&self, account: &Account) -> Result<GroupView, MultisigError> {
        Ok(GroupView {
            address: account.address,
            balance: account.balance,
            min: account.multimin,
            lifetime: account.multilifetime,
            members: self.resolve_members(&account.multisignatures).await?,
        })
    }
}

#[async_trait]
impl MultisigApi for MultisigService {
    /// Process one incoming co-signature.
    ///
    /// See the crate docs for the full state machine. Rejected paths mutate
    /// nothing and publish nothing; the accepted path appends the signature,
    /// evaluates readiness on the updated transaction, and publishes a
    /// `SignatureAccepted` event.
    async fn process_signature(&self, packet: SignaturePacket) -> Result<(), MultisigError> {
        let (Some(transaction_id), Some(signature)) = (packet.transaction, packet.signature)
        else {
            return Err(MultisigError::MissingSignature);
        };

        // Single-writer section for this transaction id: the duplicate
        // check below and the append at the end must not interleave with
        // another signature for the same transaction.
        let _guard = self.sequencer.acquire(&transaction_id).await;

        let transaction = self
            .transactions
            .get_pending(&transaction_id)
            .await
            .ok_or(MultisigError::TransactionNotFound)?;
        let message = transaction.signable_hash();

        let (account, candidates) = match &transaction.kind {
            TransactionKind::RegisterMultisig(registration) => {
                let account = self.load_account(&transaction.sender_address).await?;
                if account.is_multisig() {
                    // Re-signing a completed registration is forbidden.
                    return Err(MultisigError::PermissionDenied);
                }
                if transaction.has_signature(&signature) {
                    return Err(MultisigError::PermissionDenied);
                }
                // The candidate keysgroup comes from the transaction's own
                // payload; the account record has no keysgroup yet.
                (account, registration.keysgroup.clone())
            }
            TransactionKind::Transfer | TransactionKind::Other => {
                let account = self.load_account(&transaction.sender_address).await?;
                if !account.is_multisig() {
                    // The shared entry point is only reached for
                    // multisignature senders; treat a plain account like a
                    // missing one.
                    return Err(MultisigError::AccountNotFound);
                }
                if transaction.has_signature(&signature) {
                    return Err(MultisigError::DuplicateSignature);
                }
                let candidates = account.multisignatures.clone();
                (account, candidates)
            }
        };

        let signer = self
            .verifier
            .resolve_signer(&candidates, &signature, &message)?;
        debug!(
            transaction = ?&transaction_id[..4],
            signer = ?&signer[..4],
            "Co-signature verified"
        );

        let updated = self
            .transactions
            .append_signature(&transaction_id, signature)
            .await
            .map_err(|_| MultisigError::TransactionNotFound)?;

        let ready = is_ready(&updated, &account);
        debug!(
            transaction = ?&transaction_id[..4],
            collected = updated.signatures.len(),
            ready,
            "Co-signature accepted"
        );

        self.bus
            .publish(LedgerEvent::SignatureAccepted {
                transaction: updated,
                signature,
                ready,
            })
            .await;

        Ok(())
    }

    async fn get_group(&self, address: Address) -> Result<GroupView, MultisigError> {
        let account = self.load_account(&address).await?;
        if !account.is_multisig() {
            return Err(MultisigError::NotMultisignatureAccount);
        }
        self.build_group_view(&account).await
    }

    async fn get_groups(&self, filter: AddressFilter) -> Result<Vec<GroupView>, MultisigError> {
        filter.validate()?;

        let accounts = self
            .accounts
            .get_many(AccountCriteria::Addresses(filter.addresses))
            .await
            .map_err(|err| {
                error!(%err, "Group query failed");
                MultisigError::AccountLookupFailed(err.to_string())
            })?;

        // Any member-resolution failure aborts the whole query: partial
        // membership views are worse than none.
        let mut views = Vec::new();
        for account in accounts.iter().filter(|a| a.is_multisig()) {
            views.push(self.build_group_view(account).await?);
        }
        Ok(views)
    }

    async fn get_memberships(
        &self,
        filter: AddressFilter,
    ) -> Result<Vec<MembershipView>, MultisigError> {
        filter.validate()?;

        let mut views = Vec::new();
        for address in &filter.addresses {
            let account = self.load_account(address).await?;
            // An account that has never transacted has no recorded public
            // key, so nothing can list it in a keysgroup.
            let Some(public_key) = account.public_key else {
                continue;
            };

            let groups = self
                .accounts
                .get_many(AccountCriteria::KeysgroupContains(public_key))
                .await
                .map_err(|err| {
                    error!(%err, "Membership query failed");
                    MultisigError::AccountLookupFailed(err.to_string())
                })?;

            for group in &groups {
                views.push(self.build_group_view(group).await?);
            }
        }
        Ok(views)
    }
}

// =============================================================================
// TESTS
// =============================================================================
