//! User and location directory tests.

use super::common::*;
use crate::{AccessError, Missing, RegisterLocationRequest};
use locshare_storage::{CreateUserParams, LocationId, UserId};

#[tokio::test]
async fn user_lookup_by_email_and_id() {
    let services = create_test_services().await;
    let alice = create_test_user(&services, "a@x.com").await;

    assert_eq!(services.users.find_by_email("a@x.com").await.unwrap(), alice);
    assert_eq!(services.users.find_by_id(alice.id).await.unwrap(), alice);
    assert!(services.users.exists_by_email("a@x.com").await.unwrap());
    assert!(!services.users.exists_by_email("b@y.com").await.unwrap());
}

#[tokio::test]
async fn unknown_email_is_not_found_with_key() {
    let services = create_test_services().await;
    create_test_user(&services, "a@x.com").await;

    let err = services.users.find_by_email("A@x.com").await.unwrap_err();
    match err {
        AccessError::NotFound(Missing::UserEmail(email)) => assert_eq!(email, "A@x.com"),
        other => panic!("expected NotFound, got {:?}", other),
    }

    let err = services.users.find_by_id(UserId(77)).await.unwrap_err();
    assert!(matches!(err, AccessError::NotFound(Missing::UserId(UserId(77)))));
}

#[tokio::test]
async fn duplicate_user_registration_is_rejected() {
    let services = create_test_services().await;
    create_test_user(&services, "a@x.com").await;

    let err = services
        .users
        .register(CreateUserParams {
            email: "a@x.com".to_string(),
            name: "Other".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::AlreadyExists(_)));
    assert_eq!(services.users.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn location_registration_resolves_owner_by_email() {
    let services = create_test_services().await;
    let alice = create_test_user(&services, "a@x.com").await;

    let location = create_test_location(&services, &alice, "123 Main St").await;
    assert_eq!(location.owner_id, alice.id);

    let by_address = services
        .locations
        .find_by_address("123 Main St")
        .await
        .unwrap();
    assert_eq!(by_address, location);
    assert_eq!(
        services.locations.find_by_id(location.id).await.unwrap(),
        location
    );
    assert!(services
        .locations
        .exists_by_address("123 Main St")
        .await
        .unwrap());
}

#[tokio::test]
async fn location_with_unknown_owner_is_not_stored() {
    let services = create_test_services().await;

    let err = services
        .locations
        .register(RegisterLocationRequest {
            name: "nowhere".to_string(),
            address: "1 Ghost Rd".to_string(),
            owner_email: "ghost@x.com".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AccessError::NotFound(Missing::UserEmail(_))));
    assert!(!services
        .locations
        .exists_by_address("1 Ghost Rd")
        .await
        .unwrap());
    assert!(services.locations.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_address_is_rejected() {
    let services = create_test_services().await;
    let alice = create_test_user(&services, "a@x.com").await;
    create_test_location(&services, &alice, "123 Main St").await;

    let err = services
        .locations
        .register(RegisterLocationRequest {
            name: "again".to_string(),
            address: "123 Main St".to_string(),
            owner_email: alice.email.clone(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::AlreadyExists(_)));
}

#[tokio::test]
async fn unknown_location_lookups_are_not_found() {
    let services = create_test_services().await;

    let err = services
        .locations
        .find_by_address("404 Lost Ln")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AccessError::NotFound(Missing::LocationAddress(_))
    ));

    let err = services
        .locations
        .find_by_id(LocationId(12))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AccessError::NotFound(Missing::LocationId(LocationId(12)))
    ));
}
