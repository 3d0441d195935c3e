//! # Integration Test Flows
//!
//! Tests that mc-multisig-accounts, shared-bus, and the in-memory
//! collaborator adapters work together correctly:
//!
//! 1. **Registration lifecycle**: a registration transaction collects
//!    candidate co-signatures to quorum, the conversion is applied, and the
//!    converted account then authorizes a transfer the same way.
//! 2. **Serialization**: concurrent submissions for one transaction id are
//!    sequenced; duplicates are accepted exactly once and distinct
//!    signatures are never lost.
//! 3. **Choreography**: every acceptance is observable on the shared bus
//!    with the correct readiness flag.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    // Shared infrastructure
    use shared_bus::events::{EventFilter, EventTopic, LedgerEvent};
    use shared_bus::publisher::{EventPublisher, InMemoryEventBus};
    use shared_types::entities::{
        address_from_public_key, Account, MultisigRegistration, PendingTransaction, PublicKey,
        Signature, SignaturePacket, TransactionKind,
    };

    // The multisignature subsystem
    use mc_multisig_accounts::adapters::{
        Ed25519Verifier, InMemoryAccountStore, InMemoryTransactionPool,
    };
    use mc_multisig_accounts::{
        AddressFilter, MultisigApi, MultisigError, MultisigService, TransactionStore,
    };

    use ed25519_dalek::{Signer, SigningKey};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Node {
        pool: Arc<InMemoryTransactionPool>,
        accounts: Arc<InMemoryAccountStore>,
        bus: Arc<InMemoryEventBus>,
        multisig: Arc<MultisigService>,
    }

    fn start_node() -> Node {
        crate::init_tracing();
        let pool = Arc::new(InMemoryTransactionPool::new());
        let accounts = Arc::new(InMemoryAccountStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let multisig = Arc::new(MultisigService::new(
            pool.clone(),
            accounts.clone(),
            Arc::new(Ed25519Verifier::new()),
            bus.clone(),
        ));
        Node {
            pool,
            accounts,
            bus,
            multisig,
        }
    }

    fn keypair() -> (SigningKey, PublicKey) {
        let signing = SigningKey::generate(&mut rand::thread_rng());
        let public = signing.verifying_key().to_bytes();
        (signing, public)
    }

    fn account(public: PublicKey, keysgroup: Vec<PublicKey>, multimin: u32) -> Account {
        Account {
            address: address_from_public_key(&public),
            public_key: Some(public),
            balance: 10_000,
            multisignatures: keysgroup,
            multimin,
            multilifetime: 48,
        }
    }

    fn pending(sender: &Account, kind: TransactionKind) -> PendingTransaction {
        let mut tx = PendingTransaction {
            id: [0u8; 32],
            sender_address: sender.address,
            sender_public_key: sender.public_key.unwrap(),
            kind,
            amount: 500,
            timestamp: 1_700_000_000,
            signatures: vec![],
        };
        tx.id = tx.signable_hash();
        tx
    }

    fn cosign(tx: &PendingTransaction, signer: &SigningKey) -> Signature {
        signer.sign(&tx.signable_hash()).to_bytes()
    }

    // =============================================================================
    // REGISTRATION LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn registration_then_transfer_reaches_quorum_end_to_end() {
        let node = start_node();
        let (_, sender_pk) = keypair();
        let (signer_a, pk_a) = keypair();
        let (signer_b, pk_b) = keypair();
        let (signer_c, pk_c) = keypair();

        // Phase 1: the sender is a regular account registering a 2-of-3
        // group. The candidate keysgroup exists only in the transaction
        // payload at this point.
        let sender = account(sender_pk, vec![], 0);
        node.accounts.insert(sender.clone());

        let registration = pending(
            &sender,
            TransactionKind::RegisterMultisig(MultisigRegistration {
                keysgroup: vec![pk_a, pk_b, pk_c],
                min: 2,
                lifetime: 48,
            }),
        );
        node.pool.insert(registration.clone());

        let mut sub = node
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Signature]));

        node.multisig
            .process_signature(SignaturePacket::new(
                registration.id,
                cosign(&registration, &signer_a),
            ))
            .await
            .unwrap();
        node.multisig
            .process_signature(SignaturePacket::new(
                registration.id,
                cosign(&registration, &signer_b),
            ))
            .await
            .unwrap();

        let mut ready_flags = Vec::new();
        for _ in 0..2 {
            let event = timeout(Duration::from_millis(200), sub.recv())
                .await
                .expect("timeout")
                .expect("event");
            let LedgerEvent::SignatureAccepted { ready, .. } = event;
            ready_flags.push(ready);
        }
        assert_eq!(ready_flags, vec![false, true]);

        // Phase 2: the accounts module applies the quorum-complete
        // registration; the account record now carries the keysgroup.
        let converted = account(sender_pk, vec![pk_a, pk_b, pk_c], 2);
        node.accounts.insert(converted.clone());

        let transfer = pending(&converted, TransactionKind::Transfer);
        node.pool.insert(transfer.clone());

        node.multisig
            .process_signature(SignaturePacket::new(
                transfer.id,
                cosign(&transfer, &signer_c),
            ))
            .await
            .unwrap();
        node.multisig
            .process_signature(SignaturePacket::new(
                transfer.id,
                cosign(&transfer, &signer_a),
            ))
            .await
            .unwrap();

        let stored = node.pool.get_pending(&transfer.id).await.unwrap();
        assert_eq!(stored.signatures.len(), 2);

        // Re-signing the applied registration is forbidden.
        let err = node
            .multisig
            .process_signature(SignaturePacket::new(
                registration.id,
                cosign(&registration, &signer_c),
            ))
            .await
            .unwrap_err();
        assert_eq!(err, MultisigError::PermissionDenied);
    }

    // =============================================================================
    // SERIALIZATION UNDER CONCURRENCY
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_replays_of_one_signature_accept_exactly_once() {
        let node = start_node();
        let (_, sender_pk) = keypair();
        let (member, member_pk) = keypair();
        let sender = account(sender_pk, vec![member_pk, [0x01; 32]], 2);
        node.accounts.insert(sender.clone());

        let tx = pending(&sender, TransactionKind::Transfer);
        node.pool.insert(tx.clone());
        let signature = cosign(&tx, &member);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let multisig = Arc::clone(&node.multisig);
            let packet = SignaturePacket::new(tx.id, signature);
            handles.push(tokio::spawn(
                async move { multisig.process_signature(packet).await },
            ));
        }

        let mut accepted = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => accepted += 1,
                Err(MultisigError::DuplicateSignature) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(duplicates, 7);
        let stored = node.pool.get_pending(&tx.id).await.unwrap();
        assert_eq!(stored.signatures.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_distinct_signatures_are_all_counted() {
        let node = start_node();
        let (_, sender_pk) = keypair();
        let (member1, pk1) = keypair();
        let (member2, pk2) = keypair();
        let sender = account(sender_pk, vec![pk1, pk2], 2);
        node.accounts.insert(sender.clone());

        let tx = pending(&sender, TransactionKind::Transfer);
        node.pool.insert(tx.clone());

        let mut sub = node.bus.subscribe(EventFilter::all());

        let mut handles = Vec::new();
        for signature in [cosign(&tx, &member1), cosign(&tx, &member2)] {
            let multisig = Arc::clone(&node.multisig);
            let packet = SignaturePacket::new(tx.id, signature);
            handles.push(tokio::spawn(
                async move { multisig.process_signature(packet).await },
            ));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = node.pool.get_pending(&tx.id).await.unwrap();
        assert_eq!(stored.signatures.len(), 2);

        // Whichever order the sequencer chose, only the second acceptance
        // reached quorum.
        let mut ready_flags = Vec::new();
        for _ in 0..2 {
            let event = timeout(Duration::from_millis(200), sub.recv())
                .await
                .expect("timeout")
                .expect("event");
            let LedgerEvent::SignatureAccepted { ready, .. } = event;
            ready_flags.push(ready);
        }
        ready_flags.sort_unstable();
        assert_eq!(ready_flags, vec![false, true]);
    }

    // =============================================================================
    // GROUP RESOLUTION
    // =============================================================================

    #[tokio::test]
    async fn shared_member_appears_in_both_groups_and_memberships() {
        let node = start_node();
        let (_, group1_pk) = keypair();
        let (_, group2_pk) = keypair();
        let (_, shared_pk) = keypair();
        let (_, other_pk) = keypair();

        let group1 = account(group1_pk, vec![shared_pk, other_pk], 2);
        let group2 = account(group2_pk, vec![shared_pk], 1);
        let shared = account(shared_pk, vec![], 0);
        let group1_address = group1.address;
        let group2_address = group2.address;
        let shared_address = shared.address;
        node.accounts.insert(group1);
        node.accounts.insert(group2);
        node.accounts.insert(shared);
        node.accounts.insert(account(other_pk, vec![], 0));

        let views = node
            .multisig
            .get_groups(AddressFilter {
                addresses: vec![group1_address, group2_address],
            })
            .await
            .unwrap();
        assert_eq!(views.len(), 2);
        for view in &views {
            assert!(view.members.iter().any(|m| m.address == shared_address));
        }

        let memberships = node
            .multisig
            .get_memberships(AddressFilter::one(shared_address))
            .await
            .unwrap();
        let group_addresses: Vec<_> = memberships.iter().map(|v| v.address).collect();
        assert!(group_addresses.contains(&group1_address));
        assert!(group_addresses.contains(&group2_address));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn queries_run_in_parallel_with_signature_processing() {
        let node = start_node();
        let (member, member_pk) = keypair();
        let (_, group_pk) = keypair();
        let group = account(group_pk, vec![member_pk], 1);
        let group_address = group.address;
        node.accounts.insert(group.clone());
        node.accounts.insert(account(member_pk, vec![], 0));

        let tx = pending(&group, TransactionKind::Transfer);
        node.pool.insert(tx.clone());
        let signature = cosign(&tx, &member);

        // Read-only queries take no per-transaction lock and must complete
        // while signature processing for the same account is in flight.
        let writer = {
            let multisig = Arc::clone(&node.multisig);
            tokio::spawn(async move {
                multisig
                    .process_signature(SignaturePacket::new(tx.id, signature))
                    .await
            })
        };
        let reader = {
            let multisig = Arc::clone(&node.multisig);
            tokio::spawn(async move { multisig.get_group(group_address).await })
        };

        writer.await.unwrap().unwrap();
        let view = timeout(Duration::from_millis(500), async {
            reader.await.unwrap()
        })
        .await
        .expect("query must not block on the signature lock")
        .unwrap();
        assert_eq!(view.members.len(), 1);
    }

    // =============================================================================
    // BUS DELIVERY
    // =============================================================================

    #[tokio::test]
    async fn acceptance_event_carries_the_updated_transaction() {
        let node = start_node();
        let (_, sender_pk) = keypair();
        let (member, member_pk) = keypair();
        let sender = account(sender_pk, vec![member_pk], 1);
        node.accounts.insert(sender.clone());

        let tx = pending(&sender, TransactionKind::Transfer);
        node.pool.insert(tx.clone());
        let signature = cosign(&tx, &member);

        let mut sub = node.bus.subscribe(EventFilter::all());
        node.multisig
            .process_signature(SignaturePacket::new(tx.id, signature))
            .await
            .unwrap();

        let event = timeout(Duration::from_millis(200), sub.recv())
            .await
            .expect("timeout")
            .expect("event");
        let LedgerEvent::SignatureAccepted {
            transaction,
            signature: event_signature,
            ready,
        } = event;

        assert_eq!(transaction.id, tx.id);
        assert_eq!(transaction.signatures, vec![signature]);
        assert_eq!(event_signature, signature);
        assert!(ready);
        assert_eq!(node.bus.events_published(), 1);
        assert_eq!(
            hex::encode(transaction.id),
            hex::encode(tx.signable_hash()),
            "the id is the signable hash"
        );
    }
}
