#![allow(dead_code)]

use std::sync::Arc;

use fleetdesk_admin::domains::settings::state::Session;
use fleetdesk_admin::infra::services::FleetDataService;
use fleetdesk_admin::infra::testing::stubs::{TestFleetService, sample_vehicle};
use fleetdesk_admin::{Runtime, SettingsDomain};
use fleetdesk_model::prelude::*;

pub const REDIRECT: &str = "https://fleet.example.com/login";

pub fn runtime_with(
    service: Arc<dyn FleetDataService>,
    session: Session,
) -> Runtime {
    Runtime::new(SettingsDomain::new(session, service, REDIRECT))
}

pub fn admin_runtime(service: &TestFleetService) -> Runtime {
    runtime_with(Arc::new(service.clone()), Session::admin())
}

pub fn bea() -> Profile {
    Profile {
        id: ProfileId::new("1"),
        role: Role::User,
        full_name: "Bea".into(),
        badge_number: None,
        email: String::new(),
    }
}

pub fn seeded_service() -> TestFleetService {
    let service = TestFleetService::new();
    service.seed_profile(bea(), "b@x.com");
    service.seed_profile(
        Profile {
            id: ProfileId::new("2"),
            role: Role::Admin,
            full_name: "Ada".into(),
            badge_number: Some("A-1".into()),
            email: String::new(),
        },
        "ada@x.com",
    );
    service.seed_vehicle(sample_vehicle("U9", "Chevrolet", "Tahoe", 2019));
    service.seed_vehicle(sample_vehicle("U2", "Ford", "Transit", 2021));
    service
}

/// Fails every call, the way an unreachable service would.
pub struct UnreachableService;

#[async_trait::async_trait]
impl FleetDataService for UnreachableService {
    async fn list_profiles(&self) -> anyhow::Result<Vec<Profile>> {
        anyhow::bail!("connection refused")
    }
    async fn list_vehicles(&self) -> anyhow::Result<Vec<Vehicle>> {
        anyhow::bail!("connection refused")
    }
    async fn register_identity(
        &self,
        _email: &str,
        _password: &str,
        _redirect_to: &str,
    ) -> anyhow::Result<Option<IdentityId>> {
        anyhow::bail!("connection refused")
    }
    async fn insert_profile(&self, _row: NewProfileRow) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
    async fn update_profile(
        &self,
        _id: &ProfileId,
        _changes: ProfileChanges,
    ) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
    async fn insert_vehicle(&self, _row: NewVehicleRow) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
    async fn update_vehicle(
        &self,
        _id: &VehicleId,
        _changes: VehicleChanges,
    ) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
}
