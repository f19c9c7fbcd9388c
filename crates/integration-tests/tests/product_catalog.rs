//! Product catalog scenarios: admin gating, image events, concurrency.

use cornershop_core::WorkflowError;
use cornershop_core::workflow::ProductDraft;

use cornershop_integration_tests::{TestWorld, admin, customer};

fn draft(name: &str, price: f64, image_url: Option<&str>) -> ProductDraft {
    ProductDraft {
        name: name.to_owned(),
        description: String::new(),
        price,
        stock: 5,
        image_url: image_url.map(ToOwned::to_owned),
    }
}

#[tokio::test]
async fn only_admins_mutate_the_catalog() {
    let world = TestWorld::new();

    let err = world
        .products
        .create(draft("Desk Lamp", 100.0, None), &customer("alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Unauthorized));

    let product = world
        .products
        .create(draft("Desk Lamp", 100.0, None), &admin())
        .await
        .unwrap();

    let err = world
        .products
        .delete(product.id, &customer("alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Unauthorized));
}

#[tokio::test]
async fn image_attach_and_replace_emit_events() {
    let world = TestWorld::new();

    let product = world
        .products
        .create(
            draft("Desk Lamp", 100.0, Some("https://cdn.test/lamp.png")),
            &admin(),
        )
        .await
        .unwrap();

    let (_, etag) = world.products.get(product.id).await.unwrap();
    world
        .products
        .update(
            product.id,
            draft("Desk Lamp", 100.0, Some("https://cdn.test/lamp-v2.png")),
            etag,
            &admin(),
        )
        .await
        .unwrap();

    let events = world.sent_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["type"], "ImageUploaded");
    assert_eq!(events[0]["fileName"], "lamp.png");
    assert_eq!(events[1]["type"], "ImageReplaced");
    assert_eq!(events[1]["fileName"], "lamp-v2.png");
}

#[tokio::test]
async fn omitting_the_image_keeps_the_stored_url() {
    let world = TestWorld::new();

    let product = world
        .products
        .create(
            draft("Desk Lamp", 100.0, Some("https://cdn.test/lamp.png")),
            &admin(),
        )
        .await
        .unwrap();

    let (_, etag) = world.products.get(product.id).await.unwrap();
    let updated = world
        .products
        .update(product.id, draft("Desk Lamp", 120.0, None), etag, &admin())
        .await
        .unwrap();

    assert_eq!(updated.image_url.as_deref(), Some("https://cdn.test/lamp.png"));
    assert!((updated.price - 120.0).abs() < f64::EPSILON);

    // No replace event for an untouched image
    let events = world.sent_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "ImageUploaded");
}

#[tokio::test]
async fn delete_emits_after_the_row_is_gone() {
    let world = TestWorld::new();

    let product = world
        .products
        .create(draft("Desk Lamp", 100.0, None), &admin())
        .await
        .unwrap();
    world.products.delete(product.id, &admin()).await.unwrap();

    let err = world.products.get(product.id).await.unwrap_err();
    assert!(matches!(err, WorkflowError::ProductNotFound));

    let events = world.sent_events();
    assert_eq!(events.last().unwrap()["type"], "ProductDeleted");
}

#[tokio::test]
async fn stale_tag_update_is_rejected() {
    let world = TestWorld::new();

    let product = world
        .products
        .create(draft("Desk Lamp", 100.0, None), &admin())
        .await
        .unwrap();

    let (_, stale) = world.products.get(product.id).await.unwrap();
    let (_, fresh) = world.products.get(product.id).await.unwrap();

    world
        .products
        .update(product.id, draft("Desk Lamp", 110.0, None), fresh, &admin())
        .await
        .unwrap();

    let err = world
        .products
        .update(product.id, draft("Desk Lamp", 90.0, None), stale, &admin())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::ConcurrencyConflict));

    let (current, _) = world.products.get(product.id).await.unwrap();
    assert!((current.price - 110.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn invalid_drafts_are_rejected() {
    let world = TestWorld::new();

    for bad in [draft("", 10.0, None), draft("Lamp", -1.0, None)] {
        let err = world.products.create(bad, &admin()).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }
    assert!(world.products.list().await.unwrap().is_empty());
}
