//! Bounded FIFO queue between the BLE producer and the render consumer
//!
//! The queue is the only synchronization point between the two contexts:
//! the producer enqueues whenever the peer delivers, the consumer polls on
//! its own cadence, and neither ever blocks on the other. A record fully
//! written by `enqueue` is fully visible to a later `dequeue`.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};

use tidings_protocol::Notification;

/// Number of notifications the queue holds before the producer drops.
pub const QUEUE_DEPTH: usize = 10;

/// Fixed-capacity notification channel
///
/// Constructed once at startup and handed by reference to the producer and
/// consumer tasks; there is deliberately no process-wide instance.
pub struct NotificationQueue {
    inner: Channel<CriticalSectionRawMutex, Notification, QUEUE_DEPTH>,
}

impl NotificationQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            inner: Channel::new(),
        }
    }

    /// Append a record, preserving arrival order
    ///
    /// Never blocks. On a full queue the record is handed back unchanged
    /// so the caller can log and drop it.
    pub fn enqueue(&self, notification: Notification) -> Result<(), Notification> {
        self.inner.try_send(notification).map_err(|err| match err {
            TrySendError::Full(notification) => notification,
        })
    }

    /// Take the oldest pending record, if any
    ///
    /// Never blocks; an empty queue yields `None` and the consumer tries
    /// again on its next tick.
    pub fn dequeue(&self) -> Option<Notification> {
        self.inner.try_receive().ok()
    }

    /// Discard every pending record
    pub fn reset(&self) {
        self.inner.clear();
    }

    /// Number of records currently pending
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether the next enqueue would fail
    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}
