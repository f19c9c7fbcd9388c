//! End-to-end order workflow scenarios over in-memory storage.

use cornershop_core::WorkflowError;
use cornershop_core::models::Order;
use cornershop_core::types::OrderStatus;
use cornershop_core::workflow::{OrderDraft, OrderUpdate};

use cornershop_integration_tests::{TestWorld, admin, customer};

#[tokio::test]
async fn customer_order_is_priced_from_the_catalog() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    let product_id = world.seed_product("Desk Lamp", 100.0, 10).await;

    let order = world
        .orders
        .create(
            OrderDraft {
                customer_id: None,
                product_id,
                quantity: 3,
            },
            &customer("alice"),
        )
        .await
        .unwrap();

    assert_eq!(order.username, "alice");
    assert_eq!(order.quantity, 3);
    assert!((order.unit_price - 100.0).abs() < f64::EPSILON);
    assert!((order.total_price - 300.0).abs() < f64::EPSILON);
    assert_eq!(order.status, OrderStatus::submitted());

    let events = world.sent_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "OrderCreated");
    assert_eq!(events[0]["quantity"], 3);
    assert_eq!(events[0]["totalPrice"], 300.0);
    assert!(events[0]["transactionId"].is_string());
}

#[tokio::test]
async fn admin_orders_on_behalf_of_an_explicit_customer() {
    let world = TestWorld::new();
    let customer_id = world.seed_customer("alice").await;
    let product_id = world.seed_product("Desk Lamp", 100.0, 10).await;

    let order = world
        .orders
        .create(
            OrderDraft {
                customer_id: Some(customer_id),
                product_id,
                quantity: 1,
            },
            &admin(),
        )
        .await
        .unwrap();

    assert_eq!(order.username, "alice");
    assert_eq!(order.customer_id, customer_id);
}

#[tokio::test]
async fn admin_without_customer_reference_is_rejected() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    let product_id = world.seed_product("Desk Lamp", 100.0, 10).await;

    let err = world
        .orders
        .create(
            OrderDraft {
                customer_id: None,
                product_id,
                quantity: 1,
            },
            &admin(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::Validation(_)));
    assert!(world.sent_events().is_empty());
}

#[tokio::test]
async fn requantity_recomputes_the_total_from_the_current_price() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    let product_id = world.seed_product("Notebook", 50.0, 100).await;

    let order = world
        .orders
        .create(
            OrderDraft {
                customer_id: None,
                product_id,
                quantity: 2,
            },
            &customer("alice"),
        )
        .await
        .unwrap();
    assert!((order.total_price - 100.0).abs() < f64::EPSILON);

    let (_, etag) = world.orders.get(order.id, &admin()).await.unwrap();
    let updated = world
        .orders
        .update(
            order.id,
            OrderUpdate {
                product_id,
                quantity: 5,
                status: None,
            },
            etag,
            &admin(),
        )
        .await
        .unwrap();

    assert_eq!(updated.quantity, 5);
    assert!((updated.total_price - 250.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn foreign_customer_cannot_delete_an_order() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    world.seed_customer("bob").await;
    let product_id = world.seed_product("Desk Lamp", 100.0, 10).await;

    let order = world
        .orders
        .create(
            OrderDraft {
                customer_id: None,
                product_id,
                quantity: 1,
            },
            &customer("alice"),
        )
        .await
        .unwrap();

    let err = world
        .orders
        .delete(order.id, &customer("bob"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Unauthorized));

    // The row must be untouched
    let (still_there, _) = world.orders.get(order.id, &customer("alice")).await.unwrap();
    assert_eq!(still_there.id, order.id);
}

#[tokio::test]
async fn stale_version_tag_is_rejected_and_leaves_the_row_unchanged() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    let product_id = world.seed_product("Notebook", 50.0, 100).await;

    let order = world
        .orders
        .create(
            OrderDraft {
                customer_id: None,
                product_id,
                quantity: 2,
            },
            &customer("alice"),
        )
        .await
        .unwrap();

    let (_, stale) = world.orders.get(order.id, &admin()).await.unwrap();

    // Another writer advances the row
    world
        .orders
        .set_status(order.id, OrderStatus::custom("Pending"), &admin())
        .await
        .unwrap();

    let err = world
        .orders
        .update(
            order.id,
            OrderUpdate {
                product_id,
                quantity: 9,
                status: None,
            },
            stale,
            &admin(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::ConcurrencyConflict));

    let (current, _) = world.orders.get(order.id, &admin()).await.unwrap();
    assert_eq!(current.quantity, 2);
    assert_eq!(current.status, OrderStatus::custom("Pending"));
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    let product_id = world.seed_product("Desk Lamp", 100.0, 10).await;

    let order = world
        .orders
        .create(
            OrderDraft {
                customer_id: None,
                product_id,
                quantity: 1,
            },
            &customer("alice"),
        )
        .await
        .unwrap();

    world.orders.delete(order.id, &customer("alice")).await.unwrap();

    let err = world
        .orders
        .get(order.id, &customer("alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound));
}

#[tokio::test]
async fn listing_never_leaks_foreign_orders() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    world.seed_customer("bob").await;
    let product_id = world.seed_product("Desk Lamp", 100.0, 10).await;

    for (who, qty) in [("alice", 1), ("alice", 2), ("bob", 3)] {
        world
            .orders
            .create(
                OrderDraft {
                    customer_id: None,
                    product_id,
                    quantity: qty,
                },
                &customer(who),
            )
            .await
            .unwrap();
    }

    let bobs: Vec<(Order, _)> = world.orders.list(&customer("bob")).await.unwrap();
    assert_eq!(bobs.len(), 1);
    assert!(bobs.iter().all(|(order, _)| order.username == "bob"));

    let all = world.orders.list(&admin()).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn non_admin_cannot_change_status_through_update() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    let product_id = world.seed_product("Desk Lamp", 100.0, 10).await;

    let order = world
        .orders
        .create(
            OrderDraft {
                customer_id: None,
                product_id,
                quantity: 1,
            },
            &customer("alice"),
        )
        .await
        .unwrap();

    let (_, etag) = world
        .orders
        .get(order.id, &customer("alice"))
        .await
        .unwrap();
    let err = world
        .orders
        .update(
            order.id,
            OrderUpdate {
                product_id,
                quantity: 1,
                status: Some(OrderStatus::custom("Delivered")),
            },
            etag,
            &customer("alice"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Unauthorized));
}

#[tokio::test]
async fn set_status_requires_admin() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    let product_id = world.seed_product("Desk Lamp", 100.0, 10).await;

    let order = world
        .orders
        .create(
            OrderDraft {
                customer_id: None,
                product_id,
                quantity: 1,
            },
            &customer("alice"),
        )
        .await
        .unwrap();

    let err = world
        .orders
        .set_status(order.id, OrderStatus::custom("Delivered"), &customer("alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Unauthorized));

    let updated = world
        .orders
        .set_status(order.id, OrderStatus::custom("Delivered"), &admin())
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::custom("Delivered"));
}

#[tokio::test]
async fn zero_or_negative_quantities_never_persist() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    let product_id = world.seed_product("Desk Lamp", 100.0, 10).await;

    for qty in [0, -4] {
        let err = world
            .orders
            .create(
                OrderDraft {
                    customer_id: None,
                    product_id,
                    quantity: qty,
                },
                &customer("alice"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidQuantity));
    }

    assert!(world.orders.list(&admin()).await.unwrap().is_empty());
    assert!(world.sent_events().is_empty());
}

#[tokio::test]
async fn dangling_product_reference_fails_resolution() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    let product_id = world.seed_product("Desk Lamp", 100.0, 10).await;
    world.products.delete(product_id, &admin()).await.unwrap();

    let err = world
        .orders
        .create(
            OrderDraft {
                customer_id: None,
                product_id,
                quantity: 1,
            },
            &customer("alice"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::ProductNotFound));
}
