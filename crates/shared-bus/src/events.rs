//! # Ledger Events
//!
//! Defines the event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::entities::{PendingTransaction, Signature};

/// All events that can be published to the event bus.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A co-signature was verified and appended to a pending multisignature
    /// transaction.
    ///
    /// `ready` is true once the transaction has accumulated enough distinct
    /// signatures to meet its threshold; consumers use it to promote the
    /// transaction out of the waiting pool.
    SignatureAccepted {
        /// The pending transaction after the signature was appended.
        transaction: PendingTransaction,
        /// The signature that was accepted.
        #[serde_as(as = "Bytes")]
        signature: Signature,
        /// Whether the transaction reached its signature threshold.
        ready: bool,
    },
}

impl LedgerEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::SignatureAccepted { .. } => EventTopic::Signature,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Multisignature co-signature collection.
    Signature,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
