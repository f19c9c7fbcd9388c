//! Notification queue contract.
//!
//! Lifecycle changes to orders and products append JSON events to a named
//! queue. Delivery is best effort and at least once: the [`Notifier`] in
//! [`events`] logs a failed enqueue and moves on, never rolling back or
//! failing the already-committed write. Consumers must deduplicate by
//! transaction ID.

pub mod events;

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

pub use events::{Event, NOTIFICATION_QUEUE, Notifier};

/// Error from a queue send.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The queue endpoint is unreachable. Transient.
    #[error("queue unavailable: {0}")]
    Unavailable(String),
}

/// Append-only queue client.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Append a JSON payload to the named queue.
    async fn send(&self, queue_name: &str, payload: &str) -> Result<(), QueueError>;
}

/// Queue client that records messages in memory.
///
/// Used by tests to assert on emitted events; also usable as a dev backend.
#[derive(Default)]
pub struct MemoryQueue {
    messages: Mutex<Vec<(String, String)>>,
}

impl MemoryQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all `(queue_name, payload)` pairs sent so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages
            .lock()
            .expect("memory queue lock poisoned")
            .clone()
    }
}

#[async_trait]
impl QueueClient for MemoryQueue {
    async fn send(&self, queue_name: &str, payload: &str) -> Result<(), QueueError> {
        self.messages
            .lock()
            .map_err(|e| QueueError::Unavailable(e.to_string()))?
            .push((queue_name.to_owned(), payload.to_owned()));
        Ok(())
    }
}

/// Queue client that writes payloads to the tracing log.
///
/// Stands in when no real queue endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingQueue;

#[async_trait]
impl QueueClient for LoggingQueue {
    async fn send(&self, queue_name: &str, payload: &str) -> Result<(), QueueError> {
        tracing::info!(queue = %queue_name, %payload, "notification emitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_queue_records_sends() {
        let queue = MemoryQueue::new();
        queue.send("order-notifications", "{}").await.expect("send");
        queue.send("other", "x").await.expect("send");

        let messages = queue.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages.first().map(|(q, _)| q.as_str()), Some("order-notifications"));
    }
}
