//! Order workflow.
//!
//! Orchestrates validation, access policy, resolver lookups, persistence,
//! and notification emission for order create/update/delete. All-or-nothing
//! per operation: a resolver or policy failure persists nothing and emits
//! nothing; a notification is only emitted after the row mutation committed.
//!
//! Status machine: `Submitted -> Pending -> (Delivered | Cancelled | any
//! admin-assigned value)`. Non-admins only ever create (implicitly
//! `Submitted`); cart confirmation performs the bulk `Submitted -> Pending`
//! transition on the relational side.

use chrono::Utc;
use tracing::{info, instrument};

use crate::error::WorkflowError;
use crate::models::{Order, Product};
use crate::policy;
use crate::queue::{Event, Notifier};
use crate::resolver;
use crate::storage::{EntityStore, Etag};
use crate::types::{Actor, CustomerId, OrderId, OrderStatus, ProductId};

/// Inputs for creating an order.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    /// Target customer; required for admin actors, ignored for customers
    /// (who always order as themselves).
    pub customer_id: Option<CustomerId>,
    /// Referenced product.
    pub product_id: ProductId,
    /// Requested quantity; must be positive.
    pub quantity: i64,
}

/// Inputs for editing an order.
///
/// Prices are never accepted from the caller; the product is re-resolved and
/// the totals recomputed on every edit.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    /// Product to reference after the edit.
    pub product_id: ProductId,
    /// New quantity; must be positive.
    pub quantity: i64,
    /// New status. Admin-only; a non-admin supplying one is rejected.
    pub status: Option<OrderStatus>,
}

/// Order operations over the entity store and notification queue.
#[derive(Clone)]
pub struct OrderWorkflow {
    store: EntityStore,
    notifier: Notifier,
}

impl OrderWorkflow {
    /// Create the workflow.
    #[must_use]
    pub const fn new(store: EntityStore, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// Create an order on behalf of `actor`.
    ///
    /// Resolves customer and product, prices the order, persists it, then
    /// emits `OrderCreated`. Wall-clock UTC timestamp; fresh row key.
    ///
    /// # Errors
    ///
    /// Resolver errors (`InvalidQuantity`, `ProductNotFound`,
    /// `CustomerNotFound`, `Validation`), `Unauthorized` if the resolved
    /// customer is not the actor's own record, or `Storage` if persistence
    /// fails. On any error nothing is persisted and nothing is emitted.
    #[instrument(skip(self, draft), fields(product_id = %draft.product_id))]
    pub async fn create(&self, draft: OrderDraft, actor: &Actor) -> Result<Order, WorkflowError> {
        let inputs = resolver::resolve_order_inputs(
            &self.store,
            actor,
            draft.customer_id,
            draft.product_id,
            draft.quantity,
        )
        .await?;
        policy::authorize_owner(actor, &inputs.customer.username)?;

        let order = Order {
            id: OrderId::generate(),
            customer_id: inputs.customer.id,
            username: inputs.customer.username.clone(),
            product_id: inputs.product.id,
            product_name: inputs.product.name.clone(),
            quantity: inputs.quantity,
            unit_price: inputs.unit_price,
            total_price: inputs.total_price,
            status: OrderStatus::submitted(),
            order_date: Utc::now(),
        };

        self.store.add(&order).await?;
        info!(order_id = %order.id, total = order.total_price, "order created");

        let transaction_id = self
            .notifier
            .emit(Event::OrderCreated {
                order_id: order.id,
                customer_id: order.customer_id,
                product_id: order.product_id,
                quantity: order.quantity,
                total_price: order.total_price,
            })
            .await;
        info!(order_id = %order.id, %transaction_id, "order notification emitted");

        Ok(order)
    }

    /// Edit an order, recomputing prices from the current product record.
    ///
    /// The ownership check runs against the *stored* order, so a caller
    /// cannot reassign ownership to slip past the policy. The write is
    /// guarded by `etag`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the order is gone, `Unauthorized` on ownership or
    /// status-change violations, `ProductNotFound`/`InvalidQuantity` from
    /// re-resolution, `ConcurrencyConflict` if `etag` is stale.
    #[instrument(skip(self, changes, etag))]
    pub async fn update(
        &self,
        order_id: OrderId,
        changes: OrderUpdate,
        etag: Etag,
        actor: &Actor,
    ) -> Result<Order, WorkflowError> {
        let (existing, _) = self
            .store
            .get::<Order>(&order_id.to_string())
            .await?
            .ok_or(WorkflowError::NotFound)?;
        policy::authorize_owner(actor, &existing.username)?;

        if changes.status.is_some() && !actor.is_admin() {
            return Err(WorkflowError::Unauthorized);
        }

        let quantity =
            u32::try_from(changes.quantity).map_err(|_| WorkflowError::InvalidQuantity)?;
        if quantity == 0 {
            return Err(WorkflowError::InvalidQuantity);
        }

        // Stale client-submitted prices are ignored; only the current
        // product record prices the order.
        let (product, _) = self
            .store
            .get::<Product>(&changes.product_id.to_string())
            .await?
            .ok_or(WorkflowError::ProductNotFound)?;

        let updated = Order {
            product_id: product.id,
            product_name: product.name.clone(),
            quantity,
            unit_price: product.price,
            total_price: product.price * f64::from(quantity),
            status: changes.status.unwrap_or_else(|| existing.status.clone()),
            ..existing
        };

        self.store.update(&updated, &etag).await?;
        info!(order_id = %order_id, total = updated.total_price, "order updated");
        Ok(updated)
    }

    /// Set an order's status to an arbitrary admin-assigned value.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for non-admins, `NotFound` if the order is gone,
    /// `ConcurrencyConflict` if the row moved between read and write.
    #[instrument(skip(self, status))]
    pub async fn set_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
        actor: &Actor,
    ) -> Result<Order, WorkflowError> {
        policy::require_admin(actor)?;

        let (mut order, etag) = self
            .store
            .get::<Order>(&order_id.to_string())
            .await?
            .ok_or(WorkflowError::NotFound)?;
        order.status = status;
        self.store.update(&order, &etag).await?;
        info!(order_id = %order_id, status = %order.status, "order status set");
        Ok(order)
    }

    /// Delete an order.
    ///
    /// The `OrderDeleted` notification is emitted only after the row delete
    /// succeeded.
    ///
    /// # Errors
    ///
    /// `NotFound` if the order does not exist, `Unauthorized` if the actor
    /// does not own it.
    #[instrument(skip(self))]
    pub async fn delete(&self, order_id: OrderId, actor: &Actor) -> Result<(), WorkflowError> {
        let (order, _) = self
            .store
            .get::<Order>(&order_id.to_string())
            .await?
            .ok_or(WorkflowError::NotFound)?;
        policy::authorize_owner(actor, &order.username)?;

        self.store.delete::<Order>(&order_id.to_string()).await?;
        info!(order_id = %order_id, "order deleted");

        self.notifier
            .emit(Event::OrderDeleted { order_id })
            .await;
        Ok(())
    }

    /// List orders visible to `actor`: everything for admins, own orders
    /// only for customers. Full scan, no pagination.
    ///
    /// # Errors
    ///
    /// `Storage` if the scan fails.
    pub async fn list(&self, actor: &Actor) -> Result<Vec<(Order, Etag)>, WorkflowError> {
        let mut orders = self.store.get_all::<Order>().await?;
        if !actor.is_admin() {
            orders.retain(|(order, _)| order.username == actor.username);
        }
        Ok(orders)
    }

    /// Fetch a single order with its version tag, enforcing ownership.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent, `Unauthorized` if owned by someone else.
    pub async fn get(
        &self,
        order_id: OrderId,
        actor: &Actor,
    ) -> Result<(Order, Etag), WorkflowError> {
        let (order, etag) = self
            .store
            .get::<Order>(&order_id.to_string())
            .await?
            .ok_or(WorkflowError::NotFound)?;
        policy::authorize_owner(actor, &order.username)?;
        Ok((order, etag))
    }
}
