//! # Shared Bus - Event Bus for Inter-Subsystem Communication
//!
//! All inter-subsystem communication in the node goes through this bus;
//! direct calls between subsystems are forbidden. The multisignature
//! subsystem publishes here when a co-signature is accepted, and downstream
//! consumers (transaction pool broadcaster, API notifications) subscribe.
//!
//! ```text
//! ┌────────────────────┐                    ┌────────────────────┐
//! │ Multisig Accounts  │                    │ Pool / API / Peers │
//! │                    │    publish()       │                    │
//! │                    │ ──────┐            │                    │
//! └────────────────────┘       │            └────────────────────┘
//!                              ▼                      ↑
//!                        ┌──────────────┐             │
//!                        │  Event Bus   │ ────────────┘
//!                        └──────────────┘   subscribe()
//! ```
//!
//! Delivery is fire-and-forget: publishers never wait for consumers and no
//! acknowledgement contract is assumed.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, LedgerEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
