mod common;

use common::{REDIRECT, admin_runtime, seeded_service};
use fleetdesk_admin::common::messages::CrossDomainEvent;
use fleetdesk_admin::domains::settings::forms::{
    FormError, NewUserForm, NewVehicleForm, current_year,
};
use fleetdesk_admin::domains::settings::messages::Message;
use fleetdesk_admin::domains::settings::state::SettingsTab;
use fleetdesk_admin::domains::settings::update::{
    CREATE_USER_FAILED, CREATE_VEHICLE_FAILED,
};
use fleetdesk_admin::infra::testing::stubs::{Call, Operation, TestFleetService};
use fleetdesk_admin::Runtime;
use fleetdesk_model::prelude::*;

async fn vehicles_tab(service: &TestFleetService) -> Runtime {
    let mut runtime = admin_runtime(service);
    runtime.settle(Message::Mount).await;
    runtime.settle(Message::SelectTab(SettingsTab::Vehicles)).await;
    runtime.take_events();
    service.clear_calls();
    runtime
}

async fn fill_vehicle(runtime: &mut Runtime, unit: &str, year: &str) {
    runtime.settle(Message::ShowNewVehicleForm).await;
    runtime.settle(Message::NewVehicleUnitNumber(unit.into())).await;
    runtime.settle(Message::NewVehicleMake("Ford".into())).await;
    runtime.settle(Message::NewVehicleModel("F150".into())).await;
    runtime.settle(Message::NewVehicleYear(year.into())).await;
}

async fn fill_user(runtime: &mut Runtime, email: &str) {
    runtime.settle(Message::ShowNewUserForm).await;
    runtime.settle(Message::NewUserEmail(email.into())).await;
    runtime.settle(Message::NewUserFullName("Cy Young".into())).await;
    runtime.settle(Message::NewUserBadgeNumber("".into())).await;
    runtime.settle(Message::NewUserRole(Role::Admin)).await;
    runtime.settle(Message::NewUserPassword("s3cret!".into())).await;
}

#[tokio::test]
async fn create_vehicle_sends_available_and_resets_form() {
    let service = seeded_service();
    let mut runtime = vehicles_tab(&service).await;

    fill_vehicle(&mut runtime, "U1", "2023").await;
    assert!(runtime.state().show_new_vehicle_form);
    runtime.settle(Message::SubmitNewVehicle).await;

    let calls = service.calls();
    assert_eq!(
        calls.first(),
        Some(&Call::InsertVehicle(NewVehicleRow {
            unit_number: "U1".into(),
            make: "Ford".into(),
            model: "F150".into(),
            year: 2023,
            status: VehicleStatus::Available,
        }))
    );
    assert_eq!(service.count(Operation::ListVehicles), 1);

    let state = runtime.state();
    assert!(!state.show_new_vehicle_form);
    assert_eq!(state.new_vehicle, NewVehicleForm::default());
    assert_eq!(state.new_vehicle.year, Some(current_year()));
    assert_eq!(state.error, None);
    assert!(state.vehicles.iter().any(|v| v.unit_number == "U1"));
    assert_eq!(runtime.take_events(), vec![CrossDomainEvent::VehiclesChanged]);
}

#[tokio::test]
async fn failed_vehicle_create_keeps_modal_and_input() {
    let service = seeded_service();
    let mut runtime = vehicles_tab(&service).await;
    let listed = runtime.state().vehicles.clone();

    service.fail(Operation::InsertVehicle);
    fill_vehicle(&mut runtime, "U1", "2023").await;
    let filled = runtime.state().new_vehicle.clone();
    runtime.settle(Message::SubmitNewVehicle).await;

    let state = runtime.state();
    assert!(state.show_new_vehicle_form);
    assert_eq!(state.new_vehicle, filled);
    assert_eq!(state.error.as_deref(), Some(CREATE_VEHICLE_FAILED));
    assert_eq!(state.vehicles, listed);
    assert_eq!(service.count(Operation::ListVehicles), 0);
    assert!(runtime.take_events().is_empty());
}

#[tokio::test]
async fn invalid_vehicle_form_is_not_submitted() {
    let service = seeded_service();
    let mut runtime = vehicles_tab(&service).await;

    fill_vehicle(&mut runtime, "U1", "1899").await;
    runtime.settle(Message::SubmitNewVehicle).await;

    assert!(service.calls().is_empty());
    let state = runtime.state();
    assert!(state.show_new_vehicle_form);
    assert_eq!(state.error, None);
    assert!(matches!(
        state.new_vehicle_issue,
        Some(FormError::YearOutOfRange { min: 1900, .. })
    ));

    runtime.settle(Message::NewVehicleYear("2020".into())).await;
    runtime.settle(Message::SubmitNewVehicle).await;
    assert_eq!(service.count(Operation::InsertVehicle), 1);
    assert_eq!(runtime.state().new_vehicle_issue, None);
}

#[tokio::test]
async fn closing_the_vehicle_modal_keeps_the_form() {
    let service = seeded_service();
    let mut runtime = vehicles_tab(&service).await;

    fill_vehicle(&mut runtime, "U5", "2022").await;
    runtime.settle(Message::HideNewVehicleForm).await;
    assert!(!runtime.state().show_new_vehicle_form);
    assert_eq!(runtime.state().new_vehicle.unit_number, "U5");

    runtime.settle(Message::ShowNewVehicleForm).await;
    assert_eq!(runtime.state().new_vehicle.year, Some(2022));
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn submitting_clears_a_previous_banner() {
    let service = seeded_service();
    let mut runtime = vehicles_tab(&service).await;

    service.fail(Operation::InsertVehicle);
    fill_vehicle(&mut runtime, "U1", "2023").await;
    let task = runtime.dispatch(Message::SubmitNewVehicle);
    assert_eq!(runtime.state().error, None);
    for message in futures::future::join_all(task.into_futures()).await {
        runtime.settle(message).await;
    }
    assert!(runtime.state().error.is_some());

    service.recover(Operation::InsertVehicle);
    let _task = runtime.dispatch(Message::SubmitNewVehicle);
    assert_eq!(runtime.state().error, None);
}

#[tokio::test]
async fn create_user_registers_then_inserts_profile() {
    let service = seeded_service();
    let mut runtime = admin_runtime(&service);
    runtime.settle(Message::Mount).await;
    runtime.take_events();
    service.clear_calls();

    fill_user(&mut runtime, "cy@x.com").await;
    runtime.settle(Message::SubmitNewUser).await;

    let calls = service.calls();
    assert_eq!(
        calls[0],
        Call::RegisterIdentity {
            email: "cy@x.com".into(),
            redirect_to: REDIRECT.into(),
        }
    );
    let Call::InsertProfile(row) = &calls[1] else {
        panic!("expected a profile insert, got {:?}", calls[1]);
    };
    assert_eq!(row.full_name, "Cy Young");
    assert_eq!(row.role, Role::Admin);
    assert_eq!(row.badge_number, None);
    assert_eq!(calls[2], Call::ListProfiles);

    let state = runtime.state();
    assert!(!state.show_new_user_form);
    assert_eq!(state.new_user, NewUserForm::default());
    let created = state
        .profiles
        .iter()
        .find(|p| p.id == row.id)
        .expect("created profile is listed");
    assert_eq!(created.email, "cy@x.com");
    assert!(service.orphaned_identities().is_empty());
    assert_eq!(runtime.take_events(), vec![CrossDomainEvent::ProfilesChanged]);
}

#[tokio::test]
async fn failed_profile_insert_orphans_identity_and_keeps_modal() {
    let service = seeded_service();
    let mut runtime = admin_runtime(&service);
    runtime.settle(Message::Mount).await;
    let listed = runtime.state().profiles.clone();

    service.fail(Operation::InsertProfile);
    fill_user(&mut runtime, "cy@x.com").await;
    let filled = runtime.state().new_user.clone();
    runtime.settle(Message::SubmitNewUser).await;

    let state = runtime.state();
    assert!(state.show_new_user_form);
    assert_eq!(state.new_user, filled);
    assert_eq!(state.error.as_deref(), Some(CREATE_USER_FAILED));
    assert_eq!(state.profiles, listed);
    assert_eq!(service.orphaned_identities().len(), 1);
}

#[tokio::test]
async fn duplicate_email_fails_at_registration() {
    let service = seeded_service();
    let mut runtime = admin_runtime(&service);
    runtime.settle(Message::Mount).await;
    service.clear_calls();

    fill_user(&mut runtime, "b@x.com").await;
    runtime.settle(Message::SubmitNewUser).await;

    assert_eq!(runtime.state().error.as_deref(), Some(CREATE_USER_FAILED));
    assert_eq!(service.count(Operation::InsertProfile), 0);
    assert!(service.orphaned_identities().is_empty());
}

#[tokio::test]
async fn invalid_user_form_is_not_submitted() {
    let service = seeded_service();
    let mut runtime = admin_runtime(&service);
    runtime.settle(Message::Mount).await;
    service.clear_calls();

    fill_user(&mut runtime, "not-an-email").await;
    runtime.settle(Message::SubmitNewUser).await;

    assert!(service.calls().is_empty());
    assert_eq!(
        runtime.state().new_user_issue,
        Some(FormError::InvalidEmail("not-an-email".into()))
    );
    assert!(runtime.state().show_new_user_form);
}
