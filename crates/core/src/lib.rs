//! Cornershop Core - Domain types and workflows.
//!
//! This crate holds everything the HTTP layer orchestrates but does not own:
//!
//! - [`types`] - Newtype IDs, roles, and status values
//! - [`models`] - Customer, product, and order table entities
//! - [`storage`] - Partitioned table-store contract with optimistic concurrency
//! - [`queue`] - Notification queue contract and event payloads
//! - [`policy`] - Role/ownership access checks
//! - [`resolver`] - Pricing and customer/product reference resolution
//! - [`workflow`] - Order, product, and customer operations
//!
//! The crate performs no network or database I/O of its own; the table store
//! and queue are seams implemented by the hosting binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod models;
pub mod policy;
pub mod queue;
pub mod resolver;
pub mod storage;
pub mod types;
pub mod workflow;

pub use error::WorkflowError;
pub use types::*;
