mod common;

use std::sync::Arc;

use common::{REDIRECT, UnreachableService, seeded_service};
use fleetdesk_admin::domains::settings::forms::NewUserRequest;
use fleetdesk_admin::domains::settings::provision::{
    ProvisionError, provision_user,
};
use fleetdesk_admin::infra::testing::stubs::Operation;
use fleetdesk_model::Role;

fn request(email: &str) -> NewUserRequest {
    NewUserRequest {
        email: email.into(),
        password: "s3cret!".into(),
        full_name: "Cy Young".into(),
        badge_number: Some("C-3".into()),
        role: Role::User,
    }
}

#[tokio::test]
async fn profile_is_keyed_by_the_issued_identity() {
    let service = seeded_service();
    let id = provision_user(
        Arc::new(service.clone()),
        request("cy@x.com"),
        REDIRECT.into(),
    )
    .await
    .unwrap();

    let profile = service
        .profiles()
        .into_iter()
        .find(|p| p.id == id)
        .unwrap();
    assert_eq!(profile.email, "cy@x.com");
    assert_eq!(profile.badge_number.as_deref(), Some("C-3"));
}

#[tokio::test]
async fn profile_failure_reports_the_orphaned_identity() {
    let service = seeded_service();
    service.fail(Operation::InsertProfile);

    let err = provision_user(
        Arc::new(service.clone()),
        request("cy@x.com"),
        REDIRECT.into(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ProvisionError::Profile { .. }));
    assert_eq!(
        err.orphaned_identity().cloned(),
        service.orphaned_identities().first().cloned()
    );
    assert!(err.orphaned_identity().is_some());
}

#[tokio::test]
async fn missing_identity_stops_before_the_profile_insert() {
    let service = seeded_service();
    service.withhold_identity(true);

    let err = provision_user(
        Arc::new(service.clone()),
        request("cy@x.com"),
        REDIRECT.into(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ProvisionError::IdentityNotIssued));
    assert_eq!(service.count(Operation::InsertProfile), 0);
}

#[tokio::test]
async fn registration_failure_has_no_orphan() {
    let err = provision_user(
        Arc::new(UnreachableService),
        request("cy@x.com"),
        REDIRECT.into(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ProvisionError::Identity(_)));
    assert_eq!(err.orphaned_identity(), None);
}
