//! Pricing/join resolver.
//!
//! Translates the loosely-typed references an order submission carries
//! (customer ID or the actor's own username, product ID, quantity) into
//! validated entity instances plus computed pricing. Orders hold weak
//! references, so dangling IDs are reported as not-found, never panicked on.

use crate::error::WorkflowError;
use crate::models::{Customer, Product};
use crate::storage::EntityStore;
use crate::types::{Actor, CustomerId, ProductId};

/// Resolved order inputs with computed pricing.
#[derive(Debug, Clone)]
pub struct OrderInputs {
    /// The owning customer record.
    pub customer: Customer,
    /// The referenced product record.
    pub product: Product,
    /// Validated positive quantity.
    pub quantity: u32,
    /// `product.price` at resolution time.
    pub unit_price: f64,
    /// `unit_price * quantity`.
    pub total_price: f64,
}

/// Resolve and price the inputs of an order create or edit.
///
/// Admin actors must supply an explicit `customer_ref`, resolved by row key.
/// Non-admin actors may only resolve their own record, found by username
/// scan of the customer partition; any supplied reference is ignored.
///
/// # Errors
///
/// - `WorkflowError::InvalidQuantity` if `quantity <= 0`
/// - `WorkflowError::Validation` if an admin omits the customer reference
/// - `WorkflowError::ProductNotFound` / `WorkflowError::CustomerNotFound`
///   for dangling references
/// - `WorkflowError::Storage` if the store is unreachable
pub async fn resolve_order_inputs(
    store: &EntityStore,
    actor: &Actor,
    customer_ref: Option<CustomerId>,
    product_id: ProductId,
    quantity: i64,
) -> Result<OrderInputs, WorkflowError> {
    let quantity =
        u32::try_from(quantity).map_err(|_| WorkflowError::InvalidQuantity)?;
    if quantity == 0 {
        return Err(WorkflowError::InvalidQuantity);
    }

    let customer = resolve_customer(store, actor, customer_ref).await?;

    let (product, _) = store
        .get::<Product>(&product_id.to_string())
        .await?
        .ok_or(WorkflowError::ProductNotFound)?;

    let unit_price = product.price;
    let total_price = unit_price * f64::from(quantity);

    Ok(OrderInputs {
        customer,
        product,
        quantity,
        unit_price,
        total_price,
    })
}

/// Resolve the customer an operation acts on behalf of.
///
/// # Errors
///
/// Same customer-side errors as [`resolve_order_inputs`].
pub async fn resolve_customer(
    store: &EntityStore,
    actor: &Actor,
    customer_ref: Option<CustomerId>,
) -> Result<Customer, WorkflowError> {
    if actor.is_admin() {
        let id = customer_ref.ok_or_else(|| {
            WorkflowError::Validation("customer reference is required".to_owned())
        })?;
        let (customer, _) = store
            .get::<Customer>(&id.to_string())
            .await?
            .ok_or(WorkflowError::CustomerNotFound)?;
        Ok(customer)
    } else {
        let customers = store.get_all::<Customer>().await?;
        customers
            .into_iter()
            .map(|(customer, _)| customer)
            .find(|c| c.username == actor.username)
            .ok_or(WorkflowError::CustomerNotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryTableStore;
    use crate::types::Role;

    fn store() -> EntityStore {
        EntityStore::new(Arc::new(MemoryTableStore::new()))
    }

    fn customer(username: &str) -> Customer {
        Customer {
            id: CustomerId::generate(),
            username: username.to_owned(),
            first_name: "Test".to_owned(),
            last_name: "Customer".to_owned(),
            email: format!("{username}@example.com"),
            shipping_address: "1 High St".to_owned(),
        }
    }

    fn product(price: f64) -> Product {
        Product {
            id: ProductId::generate(),
            name: "Green tea".to_owned(),
            description: "Loose leaf".to_owned(),
            price,
            stock: 10,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_resolves_own_customer_by_username() {
        let store = store();
        let alice = customer("alice");
        let item = product(100.0);
        store.add(&alice).await.expect("add customer");
        store.add(&item).await.expect("add product");

        let actor = Actor::new("alice", Role::Customer);
        let inputs = resolve_order_inputs(&store, &actor, None, item.id, 3)
            .await
            .expect("resolve");

        assert_eq!(inputs.customer.id, alice.id);
        assert!((inputs.unit_price - 100.0).abs() < f64::EPSILON);
        assert!((inputs.total_price - 300.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_admin_resolves_explicit_customer_ref() {
        let store = store();
        let bob = customer("bob");
        let item = product(50.0);
        store.add(&bob).await.expect("add customer");
        store.add(&item).await.expect("add product");

        let actor = Actor::new("root", Role::Admin);
        let inputs = resolve_order_inputs(&store, &actor, Some(bob.id), item.id, 2)
            .await
            .expect("resolve");
        assert_eq!(inputs.customer.username, "bob");
        assert!((inputs.total_price - 100.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_admin_without_customer_ref_is_validation_error() {
        let store = store();
        let item = product(1.0);
        store.add(&item).await.expect("add product");

        let actor = Actor::new("root", Role::Admin);
        let err = resolve_order_inputs(&store, &actor, None, item.id, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[tokio::test]
    async fn test_dangling_product_reference() {
        let store = store();
        store.add(&customer("alice")).await.expect("add customer");

        let actor = Actor::new("alice", Role::Customer);
        let err = resolve_order_inputs(&store, &actor, None, ProductId::generate(), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::ProductNotFound));
    }

    #[tokio::test]
    async fn test_missing_customer_record() {
        let store = store();
        let item = product(1.0);
        store.add(&item).await.expect("add product");

        let actor = Actor::new("ghost", Role::Customer);
        let err = resolve_order_inputs(&store, &actor, None, item.id, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::CustomerNotFound));
    }

    #[tokio::test]
    async fn test_non_positive_quantity_rejected() {
        let store = store();
        let actor = Actor::new("alice", Role::Customer);
        for quantity in [0, -1, -100] {
            let err = resolve_order_inputs(&store, &actor, None, ProductId::generate(), quantity)
                .await
                .unwrap_err();
            assert!(matches!(err, WorkflowError::InvalidQuantity));
        }
    }
}
