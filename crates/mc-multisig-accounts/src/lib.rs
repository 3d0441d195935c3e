//! # Multisignature Accounts Subsystem
//!
//! Authorizes transactions from accounts that require cooperative signing by
//! multiple keyholders, and collects the co-signatures for the registration
//! transaction that converts a regular account into such an account.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Verification dispatch, readiness
//!   evaluation, query views, errors. No I/O.
//! - **Ports Layer** (`ports/`): Trait definitions for the inbound API and
//!   the outbound collaborators (transaction pool, account store, crypto).
//! - **Service Layer** (`service.rs`): `MultisigService` wires domain
//!   logic to ports and runs the signature-collection state machine.
//! - **Adapters** (`adapters/`): Ed25519 verifier, in-memory stores.
//!
//! ## Concurrency
//!
//! Mutations for one pending transaction are serialized through a keyed
//! async mutex (`sequencer`), so duplicate detection and the signature
//! append form one atomic step per transaction id. Queries never take the
//! lock and run fully in parallel.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod sequencer;
pub mod service;

// Re-export public API
pub use domain::entities::{AddressFilter, GroupMember, GroupView, MembershipView};
pub use domain::errors::{CryptoFault, MultisigError};
pub use domain::readiness::is_ready;
pub use domain::verify::{SignatureVerifier, VerifyOutcome};
pub use ports::inbound::MultisigApi;
pub use ports::outbound::{
    AccountCriteria, AccountStore, AccountStoreError, CryptoVerifier, PoolError, TransactionStore,
};
pub use sequencer::KeyedSequencer;
pub use service::MultisigService;
