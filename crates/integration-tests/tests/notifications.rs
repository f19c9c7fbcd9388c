//! Notification wire-format and delivery-decoupling scenarios.

use std::collections::HashSet;

use cornershop_core::queue::NOTIFICATION_QUEUE;
use cornershop_core::workflow::OrderDraft;

use cornershop_integration_tests::{TestWorld, customer};

#[tokio::test]
async fn events_land_on_the_notification_queue() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    let product_id = world.seed_product("Desk Lamp", 100.0, 10).await;

    world
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

    let messages = world.queue.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, NOTIFICATION_QUEUE);
}

#[tokio::test]
async fn envelope_carries_transaction_id_and_timestamp() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    let product_id = world.seed_product("Desk Lamp", 100.0, 10).await;

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

    let events = world.sent_events();
    let event = &events[0];

    assert_eq!(event["type"], "OrderCreated");
    assert_eq!(event["orderId"], order.id.to_string());
    assert_eq!(event["customerId"], order.customer_id.to_string());
    assert_eq!(event["productId"], product_id.to_string());
    assert!(event["transactionId"].is_string());
    assert!(event["timestamp"].is_string());
}

#[tokio::test]
async fn every_event_gets_a_fresh_transaction_id() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    let product_id = world.seed_product("Desk Lamp", 100.0, 10).await;

    for _ in 0..3 {
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
    }

    let ids: HashSet<String> = world
        .sent_events()
        .iter()
        .map(|event| event["transactionId"].as_str().unwrap().to_owned())
        .collect();

    // 3 creates + 3 deletes, all distinct
    assert_eq!(ids.len(), 6);
}
