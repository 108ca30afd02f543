//! Two-step user creation.
//!
//! Registering the identity and inserting its profile are separate calls with
//! no transaction between them. When the profile insert fails the identity
//! stays behind without a profile; [`ProvisionError::Profile`] carries its id
//! so the orphan can be found and cleaned up by hand.

use std::sync::Arc;

use fleetdesk_model::{IdentityId, NewProfileRow, ProfileId};
use log::{info, warn};
use thiserror::Error;

use super::forms::NewUserRequest;
use crate::infra::services::FleetDataService;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("identity registration failed")]
    Identity(#[source] anyhow::Error),

    #[error("identity registration returned no identity")]
    IdentityNotIssued,

    #[error("profile insert failed, identity {orphaned} has no profile")]
    Profile {
        orphaned: IdentityId,
        #[source]
        source: anyhow::Error,
    },
}

impl ProvisionError {
    /// The identity left without a profile, if any.
    pub fn orphaned_identity(&self) -> Option<&IdentityId> {
        match self {
            ProvisionError::Profile { orphaned, .. } => Some(orphaned),
            _ => None,
        }
    }
}

pub async fn provision_user(
    service: Arc<dyn FleetDataService>,
    request: NewUserRequest,
    redirect_to: String,
) -> Result<ProfileId, ProvisionError> {
    let identity = service
        .register_identity(&request.email, &request.password, &redirect_to)
        .await
        .map_err(ProvisionError::Identity)?
        .ok_or(ProvisionError::IdentityNotIssued)?;

    let row = NewProfileRow {
        id: ProfileId::from(identity.clone()),
        role: request.role,
        full_name: request.full_name,
        badge_number: request.badge_number,
    };
    let id = row.id.clone();

    if let Err(source) = service.insert_profile(row).await {
        warn!(
            "Identity {} for {} was registered but its profile was not created",
            identity, request.email
        );
        return Err(ProvisionError::Profile {
            orphaned: identity,
            source,
        });
    }

    info!("Provisioned user {} ({})", id, request.email);
    Ok(id)
}
