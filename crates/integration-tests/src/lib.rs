//! Integration test harness for the Cornershop workflows.
//!
//! Wires the workflows to an in-memory table store and a capturing queue so
//! scenarios run end to end without external services. Each [`TestWorld`] is
//! fully isolated; tests never share state.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;

use cornershop_core::models::{Customer, Product};
use cornershop_core::queue::{MemoryQueue, Notifier, QueueClient};
use cornershop_core::storage::{EntityStore, MemoryTableStore};
use cornershop_core::types::{Actor, CustomerId, ProductId, Role};
use cornershop_core::workflow::{CustomerDirectory, OrderWorkflow, ProductCatalog};

/// A fully wired, isolated instance of the domain workflows.
pub struct TestWorld {
    pub store: EntityStore,
    pub queue: Arc<MemoryQueue>,
    pub orders: OrderWorkflow,
    pub products: ProductCatalog,
    pub customers: CustomerDirectory,
}

impl TestWorld {
    /// Build a fresh world over empty storage and an empty queue.
    #[must_use]
    pub fn new() -> Self {
        let store = EntityStore::new(Arc::new(MemoryTableStore::new()));
        let queue = Arc::new(MemoryQueue::new());
        let notifier = Notifier::new(Arc::clone(&queue) as Arc<dyn QueueClient>);

        let orders = OrderWorkflow::new(store.clone(), notifier.clone());
        let products = ProductCatalog::new(store.clone(), notifier);
        let customers = CustomerDirectory::new(store.clone());

        Self {
            store,
            queue,
            orders,
            products,
            customers,
        }
    }

    /// Seed a customer profile directly into the store.
    pub async fn seed_customer(&self, username: &str) -> CustomerId {
        let customer = Customer {
            id: CustomerId::generate(),
            username: username.to_owned(),
            first_name: username.to_owned(),
            last_name: "Tester".to_owned(),
            email: format!("{username}@example.test"),
            shipping_address: "1 Test Lane".to_owned(),
        };
        let id = customer.id;
        self.store.add(&customer).await.unwrap();
        id
    }

    /// Seed a product directly into the store.
    pub async fn seed_product(&self, name: &str, price: f64, stock: u32) -> ProductId {
        let product = Product {
            id: ProductId::generate(),
            name: name.to_owned(),
            description: format!("{name} for testing"),
            price,
            stock,
            image_url: None,
        };
        let id = product.id;
        self.store.add(&product).await.unwrap();
        id
    }

    /// Payloads sent so far, parsed as JSON.
    #[must_use]
    pub fn sent_events(&self) -> Vec<serde_json::Value> {
        self.queue
            .messages()
            .into_iter()
            .map(|(_, payload)| serde_json::from_str(&payload).unwrap())
            .collect()
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// An admin actor.
#[must_use]
pub fn admin() -> Actor {
    Actor::new("admin", Role::Admin)
}

/// A customer actor with the given username.
#[must_use]
pub fn customer(username: &str) -> Actor {
    Actor::new(username, Role::Customer)
}
