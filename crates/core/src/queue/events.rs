//! Typed notification events and the fire-and-forget emitter.
//!
//! Every payload carries a fresh transaction ID and a UTC timestamp:
//!
//! ```json
//! {
//!   "transactionId": "…",
//!   "type": "OrderCreated",
//!   "orderId": "…",
//!   "customerId": "…",
//!   "productId": "…",
//!   "quantity": 3,
//!   "totalPrice": 300.0,
//!   "timestamp": "2026-01-01T00:00:00Z"
//! }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::QueueClient;
use crate::types::{CustomerId, OrderId, ProductId, TransactionId};

/// Queue all lifecycle notifications are appended to.
pub const NOTIFICATION_QUEUE: &str = "order-notifications";

/// Lifecycle event bodies, tagged by `type` in the JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Event {
    /// An order was created and persisted.
    OrderCreated {
        order_id: OrderId,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: u32,
        total_price: f64,
    },
    /// An order row was deleted.
    OrderDeleted { order_id: OrderId },
    /// A product row was deleted.
    ProductDeleted { product_id: ProductId },
    /// A product gained its first image.
    ImageUploaded {
        product_id: ProductId,
        file_name: String,
    },
    /// A product's image was replaced.
    ImageReplaced {
        product_id: ProductId,
        file_name: String,
    },
}

/// Full wire payload: transaction ID + event body + timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Fresh per logical event; consumers deduplicate on it.
    pub transaction_id: TransactionId,
    /// The event body, flattened alongside the envelope fields.
    #[serde(flatten)]
    pub event: Event,
    /// Emission time, UTC.
    pub timestamp: DateTime<Utc>,
}

/// Fire-and-forget event emitter over a [`QueueClient`].
///
/// Emission failures are logged and swallowed: the entity mutation the event
/// describes has already committed, and notification delivery is explicitly
/// decoupled from persistence consistency.
#[derive(Clone)]
pub struct Notifier {
    client: Arc<dyn QueueClient>,
    queue_name: String,
}

impl Notifier {
    /// Create a notifier targeting [`NOTIFICATION_QUEUE`].
    #[must_use]
    pub fn new(client: Arc<dyn QueueClient>) -> Self {
        Self::with_queue(client, NOTIFICATION_QUEUE)
    }

    /// Create a notifier targeting a custom queue.
    #[must_use]
    pub fn with_queue(client: Arc<dyn QueueClient>, queue_name: impl Into<String>) -> Self {
        Self {
            client,
            queue_name: queue_name.into(),
        }
    }

    /// Emit an event with a fresh transaction ID and the current wall clock.
    ///
    /// Returns the transaction ID the payload carried. Never fails: enqueue
    /// errors are logged at error level.
    pub async fn emit(&self, event: Event) -> TransactionId {
        let envelope = Envelope {
            transaction_id: TransactionId::generate(),
            event,
            timestamp: Utc::now(),
        };
        let transaction_id = envelope.transaction_id;

        match serde_json::to_string(&envelope) {
            Ok(payload) => {
                if let Err(e) = self.client.send(&self.queue_name, &payload).await {
                    tracing::error!(
                        error = %e,
                        transaction_id = %transaction_id,
                        "failed to enqueue notification"
                    );
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize notification payload");
            }
        }

        transaction_id
    }
}
