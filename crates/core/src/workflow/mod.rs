//! Workflow services orchestrating policy checks, resolution, persistence,
//! and notification emission.

pub mod customers;
pub mod orders;
pub mod products;

pub use customers::{CustomerDirectory, CustomerDraft};
pub use orders::{OrderDraft, OrderUpdate, OrderWorkflow};
pub use products::{ProductCatalog, ProductDraft};
