//! Customer records.

use serde::{Deserialize, Serialize};

use crate::storage::TableEntity;
use crate::types::CustomerId;

/// A customer profile stored in the `Customer` partition.
///
/// Linked to the relational auth user by `username`; orders reference it by
/// [`CustomerId`] as a lookup-only relation (no foreign-key enforcement).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Row key.
    pub id: CustomerId,
    /// Login name of the owning user.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Shipping address, free form.
    pub shipping_address: String,
}

impl TableEntity for Customer {
    const PARTITION: &'static str = "Customer";

    fn row_key(&self) -> String {
        self.id.to_string()
    }
}
