//! Adapters: concrete implementations of the outbound ports.

pub mod ed25519;
pub mod memory_accounts;
pub mod memory_pool;

pub use ed25519::Ed25519Verifier;
pub use memory_accounts::InMemoryAccountStore;
pub use memory_pool::InMemoryTransactionPool;
