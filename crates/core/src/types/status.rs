//! Order and cart status values.
//!
//! Statuses are free text rather than a closed enum: customers only ever
//! produce `Submitted`, the cart confirmation pass produces `Pending`, and
//! admins may assign arbitrary values (`Delivered`, `Cancelled`, anything
//! else). The newtypes exist so the well-known values have one spelling.

use serde::{Deserialize, Serialize};

/// Free-text order status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    /// Initial status for every customer-created order.
    #[must_use]
    pub fn submitted() -> Self {
        Self("Submitted".to_owned())
    }

    /// Status after cart confirmation.
    #[must_use]
    pub fn pending() -> Self {
        Self("Pending".to_owned())
    }

    /// Arbitrary admin-assigned status.
    #[must_use]
    pub fn custom(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw status string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::submitted()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Free-text cart line status (`Submitted` -> `Pending` -> admin value).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartStatus(String);

impl CartStatus {
    /// Status for a freshly added cart line.
    #[must_use]
    pub fn submitted() -> Self {
        Self("Submitted".to_owned())
    }

    /// Status after the customer confirms their cart.
    #[must_use]
    pub fn pending() -> Self {
        Self("Pending".to_owned())
    }

    /// Arbitrary admin-assigned status.
    #[must_use]
    pub fn custom(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw status string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this line is still awaiting confirmation.
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.0 == "Submitted"
    }
}

impl Default for CartStatus {
    fn default() -> Self {
        Self::submitted()
    }
}

impl std::fmt::Display for CartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CartStatus {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_defaults_to_submitted() {
        assert_eq!(OrderStatus::default().as_str(), "Submitted");
    }

    #[test]
    fn test_order_status_serde_transparent() {
        let status = OrderStatus::custom("Delivered");
        let json = serde_json::to_string(&status).expect("serialize");
        assert_eq!(json, "\"Delivered\"");
    }

    #[test]
    fn test_cart_status_is_submitted() {
        assert!(CartStatus::submitted().is_submitted());
        assert!(!CartStatus::pending().is_submitted());
        assert!(!CartStatus::custom("Shipped").is_submitted());
    }
}
