use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use fleetdesk_model::prelude::*;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::infra::services::fleet::FleetDataService;

/// Service operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListProfiles,
    ListVehicles,
    RegisterIdentity,
    InsertProfile,
    UpdateProfile,
    InsertVehicle,
    UpdateVehicle,
}

/// A recorded request, payload included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListProfiles,
    ListVehicles,
    RegisterIdentity { email: String, redirect_to: String },
    InsertProfile(NewProfileRow),
    UpdateProfile(ProfileId, ProfileChanges),
    InsertVehicle(NewVehicleRow),
    UpdateVehicle(VehicleId, VehicleChanges),
}

impl Call {
    pub fn operation(&self) -> Operation {
        match self {
            Call::ListProfiles => Operation::ListProfiles,
            Call::ListVehicles => Operation::ListVehicles,
            Call::RegisterIdentity { .. } => Operation::RegisterIdentity,
            Call::InsertProfile(_) => Operation::InsertProfile,
            Call::UpdateProfile(..) => Operation::UpdateProfile,
            Call::InsertVehicle(_) => Operation::InsertVehicle,
            Call::UpdateVehicle(..) => Operation::UpdateVehicle,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct InnerFleetState {
    profiles: Vec<Profile>,
    vehicles: Vec<Vehicle>,
    identities: Vec<(IdentityId, String)>,
    failing: HashSet<Operation>,
    withhold_identity: bool,
    calls: Vec<Call>,
}

/// In-memory [`FleetDataService`] with failure injection and call recording.
#[derive(Debug, Clone, Default)]
pub struct TestFleetService {
    inner: Arc<RwLock<InnerFleetState>>,
}

impl TestFleetService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small roster and fleet for demo mode.
    pub fn with_sample_fleet() -> Self {
        let service = Self::new();
        service.seed_profile(
            sample_profile("Ada Lovelace", Role::Admin, Some("A-100")),
            "ada@fleet.example.com",
        );
        service.seed_profile(
            sample_profile("Grace Hopper", Role::User, None),
            "grace@fleet.example.com",
        );
        service.seed_vehicle(sample_vehicle("U-12", "Ford", "F150", 2023));
        service
            .seed_vehicle(sample_vehicle("U-07", "Chevrolet", "Tahoe", 2021));
        service
    }

    /// Insert a profile and its identity directly, bypassing the call log.
    pub fn seed_profile(&self, mut profile: Profile, email: &str) {
        let mut inner = self.inner.write();
        profile.email = email.to_string();
        inner
            .identities
            .push((IdentityId::new(profile.id.as_str()), email.to_string()));
        inner.profiles.push(profile);
    }

    pub fn seed_vehicle(&self, vehicle: Vehicle) {
        self.inner.write().vehicles.push(vehicle);
    }

    pub fn fail(&self, operation: Operation) {
        self.inner.write().failing.insert(operation);
    }

    pub fn recover(&self, operation: Operation) {
        self.inner.write().failing.remove(&operation);
    }

    /// Make sign-up succeed without issuing an identity.
    pub fn withhold_identity(&self, withhold: bool) {
        self.inner.write().withhold_identity = withhold;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.read().calls.clone()
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.inner
            .read()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    pub fn clear_calls(&self) {
        self.inner.write().calls.clear();
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.inner.read().profiles.clone()
    }

    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.inner.read().vehicles.clone()
    }

    /// Identities that have no profile row.
    pub fn orphaned_identities(&self) -> Vec<IdentityId> {
        let inner = self.inner.read();
        inner
            .identities
            .iter()
            .filter(|(id, _)| {
                !inner.profiles.iter().any(|p| p.id.as_str() == id.as_str())
            })
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn record(&self, call: Call) -> Result<()> {
        let mut inner = self.inner.write();
        let operation = call.operation();
        inner.calls.push(call);
        if inner.failing.contains(&operation) {
            bail!("injected failure for {:?}", operation);
        }
        Ok(())
    }
}

#[async_trait]
impl FleetDataService for TestFleetService {
    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.record(Call::ListProfiles)?;
        let mut profiles = self.profiles();
        profiles.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(profiles)
    }

    async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        self.record(Call::ListVehicles)?;
        let mut vehicles = self.vehicles();
        vehicles.sort_by(|a, b| a.unit_number.cmp(&b.unit_number));
        Ok(vehicles)
    }

    async fn register_identity(
        &self,
        email: &str,
        _password: &str,
        redirect_to: &str,
    ) -> Result<Option<IdentityId>> {
        self.record(Call::RegisterIdentity {
            email: email.to_string(),
            redirect_to: redirect_to.to_string(),
        })?;
        let mut inner = self.inner.write();
        if inner.identities.iter().any(|(_, known)| known == email) {
            bail!("identity already registered for {email}");
        }
        if inner.withhold_identity {
            return Ok(None);
        }
        let id = IdentityId::new(Uuid::now_v7().to_string());
        inner.identities.push((id.clone(), email.to_string()));
        Ok(Some(id))
    }

    async fn insert_profile(&self, row: NewProfileRow) -> Result<()> {
        self.record(Call::InsertProfile(row.clone()))?;
        let mut inner = self.inner.write();
        let Some(email) = inner
            .identities
            .iter()
            .find(|(id, _)| id.as_str() == row.id.as_str())
            .map(|(_, email)| email.clone())
        else {
            bail!("no identity {} to attach a profile to", row.id);
        };
        if inner.profiles.iter().any(|p| p.id == row.id) {
            bail!("profile {} already exists", row.id);
        }
        inner.profiles.push(Profile {
            id: row.id,
            role: row.role,
            full_name: row.full_name,
            badge_number: row.badge_number,
            email,
        });
        Ok(())
    }

    async fn update_profile(
        &self,
        id: &ProfileId,
        changes: ProfileChanges,
    ) -> Result<()> {
        self.record(Call::UpdateProfile(id.clone(), changes.clone()))?;
        let mut inner = self.inner.write();
        let Some(profile) = inner.profiles.iter_mut().find(|p| &p.id == id)
        else {
            bail!("no profile {id}");
        };
        profile.role = changes.role;
        profile.full_name = changes.full_name;
        profile.badge_number = changes.badge_number;
        Ok(())
    }

    async fn insert_vehicle(&self, row: NewVehicleRow) -> Result<()> {
        self.record(Call::InsertVehicle(row.clone()))?;
        self.inner.write().vehicles.push(Vehicle {
            id: VehicleId::new(Uuid::now_v7().to_string()),
            unit_number: row.unit_number,
            make: row.make,
            model: row.model,
            year: row.year,
            status: row.status,
        });
        Ok(())
    }

    async fn update_vehicle(
        &self,
        id: &VehicleId,
        changes: VehicleChanges,
    ) -> Result<()> {
        self.record(Call::UpdateVehicle(id.clone(), changes.clone()))?;
        let mut inner = self.inner.write();
        let Some(vehicle) = inner.vehicles.iter_mut().find(|v| &v.id == id)
        else {
            bail!("no vehicle {id}");
        };
        vehicle.unit_number = changes.unit_number;
        vehicle.make = changes.make;
        vehicle.model = changes.model;
        vehicle.year = changes.year;
        Ok(())
    }
}

pub fn sample_profile(
    full_name: &str,
    role: Role,
    badge_number: Option<&str>,
) -> Profile {
    Profile {
        id: ProfileId::new(Uuid::now_v7().to_string()),
        role,
        full_name: full_name.to_string(),
        badge_number: badge_number.map(str::to_string),
        email: String::new(),
    }
}

pub fn sample_vehicle(
    unit_number: &str,
    make: &str,
    model: &str,
    year: i32,
) -> Vehicle {
    Vehicle {
        id: VehicleId::new(Uuid::now_v7().to_string()),
        unit_number: unit_number.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        year,
        status: VehicleStatus::Available,
    }
}
