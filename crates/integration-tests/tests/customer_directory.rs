//! Customer directory ownership scenarios.

use cornershop_core::WorkflowError;
use cornershop_core::workflow::CustomerDraft;

use cornershop_integration_tests::{TestWorld, admin, customer};

fn draft(username: &str, email: &str) -> CustomerDraft {
    CustomerDraft {
        username: username.to_owned(),
        first_name: "Test".to_owned(),
        last_name: "Person".to_owned(),
        email: email.to_owned(),
        shipping_address: "1 Test Lane".to_owned(),
    }
}

#[tokio::test]
async fn customers_manage_only_their_own_profile() {
    let world = TestWorld::new();

    // Creating a profile for someone else is rejected
    let err = world
        .customers
        .create(draft("alice", "alice@example.test"), &customer("bob"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Unauthorized));

    let alice = world
        .customers
        .create(draft("alice", "alice@example.test"), &customer("alice"))
        .await
        .unwrap();

    // Bob cannot read or update alice's record
    let err = world
        .customers
        .get(alice.id, &customer("bob"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Unauthorized));

    let (_, etag) = world.customers.get(alice.id, &customer("alice")).await.unwrap();
    let err = world
        .customers
        .update(
            alice.id,
            draft("alice", "evil@example.test"),
            etag,
            &customer("bob"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Unauthorized));
}

#[tokio::test]
async fn admin_sees_every_profile_customers_see_their_own() {
    let world = TestWorld::new();
    world.seed_customer("alice").await;
    world.seed_customer("bob").await;

    let all = world.customers.list(&admin()).await.unwrap();
    assert_eq!(all.len(), 2);

    let own = world.customers.list(&customer("alice")).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].0.username, "alice");
}

#[tokio::test]
async fn find_by_username_scans_the_partition() {
    let world = TestWorld::new();
    let alice_id = world.seed_customer("alice").await;
    world.seed_customer("bob").await;

    let found = world.customers.find_by_username("alice").await.unwrap();
    assert_eq!(found.unwrap().0.id, alice_id);

    let missing = world.customers.find_by_username("carol").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn username_is_immutable_on_update() {
    let world = TestWorld::new();
    let alice_id = world.seed_customer("alice").await;

    let (_, etag) = world.customers.get(alice_id, &admin()).await.unwrap();
    let updated = world
        .customers
        .update(alice_id, draft("renamed", "alice@example.test"), etag, &admin())
        .await
        .unwrap();

    assert_eq!(updated.username, "alice");
}

#[tokio::test]
async fn delete_requires_ownership() {
    let world = TestWorld::new();
    let alice_id = world.seed_customer("alice").await;

    let err = world
        .customers
        .delete(alice_id, &customer("bob"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Unauthorized));

    world.customers.delete(alice_id, &customer("alice")).await.unwrap();
    let err = world
        .customers
        .get(alice_id, &admin())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound));
}
