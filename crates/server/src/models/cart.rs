//! Cart line domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cornershop_core::types::{CartLineId, CartStatus, ProductId};

/// One cart add action.
///
/// The product reference is lookup-only; a deleted product leaves the line
/// dangling and it simply fails to resolve at order time.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    /// Serial row ID.
    pub id: CartLineId,
    /// Owning customer's username.
    pub customer_username: String,
    /// Referenced product.
    pub product_id: ProductId,
    /// Requested quantity.
    pub quantity: u32,
    /// `Submitted` on add, `Pending` after confirmation, then admin-set.
    pub status: CartStatus,
    /// When the line was added.
    pub created_at: DateTime<Utc>,
}
