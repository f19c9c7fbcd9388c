//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use cornershop_core::queue::Notifier;
use cornershop_core::storage::EntityStore;
use cornershop_core::workflow::{CustomerDirectory, OrderWorkflow, ProductCatalog};

use crate::config::ServerConfig;
use crate::services::documents::DocumentVault;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the connection pool, the entity-store
/// workflows, and the document vault.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    orders: OrderWorkflow,
    products: ProductCatalog,
    customers: CustomerDirectory,
    documents: DocumentVault,
}

impl AppState {
    /// Create a new application state over the given store and queue.
    #[must_use]
    pub fn new(
        config: ServerConfig,
        pool: PgPool,
        store: EntityStore,
        notifier: Notifier,
        documents: DocumentVault,
    ) -> Self {
        let orders = OrderWorkflow::new(store.clone(), notifier.clone());
        let products = ProductCatalog::new(store.clone(), notifier);
        let customers = CustomerDirectory::new(store);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                orders,
                products,
                customers,
                documents,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the order workflow.
    #[must_use]
    pub fn orders(&self) -> &OrderWorkflow {
        &self.inner.orders
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn products(&self) -> &ProductCatalog {
        &self.inner.products
    }

    /// Get a reference to the customer directory.
    #[must_use]
    pub fn customers(&self) -> &CustomerDirectory {
        &self.inner.customers
    }

    /// Get a reference to the document vault.
    #[must_use]
    pub fn documents(&self) -> &DocumentVault {
        &self.inner.documents
    }
}
