//! Product records.

use serde::{Deserialize, Serialize};

use crate::storage::TableEntity;
use crate::types::ProductId;

/// A catalog product stored in the `Product` partition.
///
/// Mutated only by admins. `price` is plain floating point; stored orders
/// snapshot it at resolution time and are never repriced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Row key.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit price in the store currency.
    pub price: f64,
    /// Units in stock.
    pub stock: u32,
    /// URL of the product image, if one was uploaded.
    pub image_url: Option<String>,
}

impl TableEntity for Product {
    const PARTITION: &'static str = "Product";

    fn row_key(&self) -> String {
        self.id.to_string()
    }
}
