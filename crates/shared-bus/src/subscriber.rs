//! # Event Subscriber
//!
//! Defines the subscription side of the event bus.

use crate::events::{EventFilter, LedgerEvent};
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was closed.
    #[error("Event bus closed")]
    Closed,
}

/// Trait for subscribing to events from the bus.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe to events matching a filter.
    fn subscribe(&self, filter: EventFilter) -> Subscription;
}

/// A subscription handle for receiving events.
pub struct Subscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<LedgerEvent>,

    /// Filter for this subscription.
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<LedgerEvent>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next event that matches the filter.
    ///
    /// Returns `None` once the channel is closed (bus dropped). A lagged
    /// receiver skips the dropped events and keeps going.
    pub async fn recv(&mut self) -> Option<LedgerEvent> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some events dropped");
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Some(event);
            }
        }
    }

    /// Try to receive the next event without blocking.
    ///
    /// `Ok(None)` means no matching event is currently available.
    pub fn try_recv(&mut self) -> Result<Option<LedgerEvent>, SubscriptionError> {
        loop {
            let event = match self.receiver.try_recv() {
                Ok(e) => e,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if self.filter.matches(&event) {
                return Ok(Some(event));
            }
        }
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

/// A stream wrapper for subscriptions.
///
/// Implements `tokio_stream::Stream` for use with stream combinators.
pub struct EventStream {
    subscription: Subscription,
}

impl EventStream {
    /// Create a new event stream from a subscription.
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Get the filter for this stream.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        self.subscription.filter()
    }
}

impl Stream for EventStream {
    type Item = LedgerEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.subscription.try_recv() {
            Ok(Some(event)) => Poll::Ready(Some(event)),
            Ok(None) => {
                // No event ready; re-arm the waker and park.
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Err(SubscriptionError::Closed) => Poll::Ready(None),
        }
    }
}
