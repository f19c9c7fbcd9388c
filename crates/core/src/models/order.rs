//! Order records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::TableEntity;
use crate::types::{CustomerId, OrderId, OrderStatus, ProductId};

/// An order stored in the `Order` partition.
///
/// Customer and product references are lookup-only; `product_name`,
/// `unit_price`, and `total_price` are snapshots from the last successful
/// resolver pass. Invariant: `total_price == unit_price * quantity` as of
/// that pass; later product price changes do not reprice stored orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Row key.
    pub id: OrderId,
    /// Referenced customer row.
    pub customer_id: CustomerId,
    /// Owning username, snapshotted at creation for ownership checks.
    pub username: String,
    /// Referenced product row.
    pub product_id: ProductId,
    /// Product name snapshot.
    pub product_name: String,
    /// Ordered quantity, always positive.
    pub quantity: u32,
    /// Product price snapshot.
    pub unit_price: f64,
    /// `unit_price * quantity` at resolution time.
    pub total_price: f64,
    /// Free-text status, `Submitted` on creation.
    pub status: OrderStatus,
    /// Wall-clock creation time, UTC. Not guaranteed monotonic.
    pub order_date: DateTime<Utc>,
}

impl TableEntity for Order {
    const PARTITION: &'static str = "Order";

    fn row_key(&self) -> String {
        self.id.to_string()
    }
}
