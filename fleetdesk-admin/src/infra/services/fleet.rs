use anyhow::Result;
use async_trait::async_trait;
use fleetdesk_model::prelude::*;
use serde::Deserialize;
use std::sync::Arc;

use crate::infra::api_client::ApiClient;

pub const PROFILES: &str = "profiles";
pub const VEHICLES: &str = "vehicles";

/// Profile columns plus the email of the linked identity record.
pub const PROFILE_COLUMNS: &str =
    "id,role,full_name,badge_number,auth_users(email)";

/// Everything the settings screen asks of the hosted data service.
#[async_trait]
pub trait FleetDataService: Send + Sync {
    /// All profiles ordered by `full_name`.
    async fn list_profiles(&self) -> Result<Vec<Profile>>;

    /// All vehicles ordered by `unit_number`.
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>>;

    async fn register_identity(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<Option<IdentityId>>;

    async fn insert_profile(&self, row: NewProfileRow) -> Result<()>;

    async fn update_profile(
        &self,
        id: &ProfileId,
        changes: ProfileChanges,
    ) -> Result<()>;

    async fn insert_vehicle(&self, row: NewVehicleRow) -> Result<()>;

    async fn update_vehicle(
        &self,
        id: &VehicleId,
        changes: VehicleChanges,
    ) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    id: ProfileId,
    role: Role,
    full_name: String,
    badge_number: Option<String>,
    #[serde(default)]
    auth_users: Option<LinkedIdentity>,
}

#[derive(Debug, Deserialize)]
struct LinkedIdentity {
    #[serde(default)]
    email: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            role: row.role,
            full_name: row.full_name,
            badge_number: row.badge_number,
            email: row
                .auth_users
                .and_then(|identity| identity.email)
                .unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FleetApiAdapter {
    client: Arc<ApiClient>,
}

impl FleetApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FleetDataService for FleetApiAdapter {
    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let rows: Vec<ProfileRow> = self
            .client
            .select(PROFILES, PROFILE_COLUMNS, "full_name")
            .await?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        Ok(self.client.select(VEHICLES, "*", "unit_number").await?)
    }

    async fn register_identity(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<Option<IdentityId>> {
        Ok(self.client.sign_up(email, password, redirect_to).await?)
    }

    async fn insert_profile(&self, row: NewProfileRow) -> Result<()> {
        Ok(self.client.insert(PROFILES, &[row]).await?)
    }

    async fn update_profile(
        &self,
        id: &ProfileId,
        changes: ProfileChanges,
    ) -> Result<()> {
        Ok(self
            .client
            .update_by_id(PROFILES, id.as_str(), &changes)
            .await?)
    }

    async fn insert_vehicle(&self, row: NewVehicleRow) -> Result<()> {
        Ok(self.client.insert(VEHICLES, &[row]).await?)
    }

    async fn update_vehicle(
        &self,
        id: &VehicleId,
        changes: VehicleChanges,
    ) -> Result<()> {
        Ok(self
            .client
            .update_by_id(VEHICLES, id.as_str(), &changes)
            .await?)
    }
}
