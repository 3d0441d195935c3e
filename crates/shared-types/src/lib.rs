//! # Shared Types Crate
//!
//! Domain entities shared between the multisignature subsystem and its
//! collaborator modules (accounts, transaction pool).
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Collaborator Ownership**: `Account` records are owned and mutated by
//!   the accounts module; `PendingTransaction` records by the transaction
//!   pool. The multisignature subsystem reads them and appends collected
//!   signatures, nothing more.

pub mod entities;

pub use entities::*;
