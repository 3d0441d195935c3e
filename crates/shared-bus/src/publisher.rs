//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use crate::events::{EventFilter, LedgerEvent};
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// Trait for publishing events to the bus.
///
/// This is the interface subsystems use to emit events for consumption by
/// other subsystems. Publishing is fire-and-forget.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event to the bus.
    ///
    /// Returns the number of active subscribers that received the event.
    async fn publish(&self, event: LedgerEvent) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the event bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer
/// semantics. Suitable for single-node operation; distributed deployments
/// would substitute a networked implementation behind the same trait.
pub struct InMemoryEventBus {
    /// Broadcast sender for events.
    sender: broadcast::Sender<LedgerEvent>,

    /// Total events published.
    events_published: AtomicU64,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory event bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            events_published: AtomicU64::new(0),
        }
    }

    /// Subscribe to events matching a filter.
    ///
    /// Returns a `Subscription` handle that can be used to receive events.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, "New subscription created");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Get a stream of events matching a filter.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.subscribe(filter))
    }

    /// Number of currently attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: LedgerEvent) -> usize {
        self.events_published.fetch_add(1, Ordering::Relaxed);

        // send() errors only when there are no receivers; the bus is
        // fire-and-forget, so that is not a failure.
        let delivered = self.sender.send(event).unwrap_or(0);
        debug!(delivered, "Event published");
        delivered
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
