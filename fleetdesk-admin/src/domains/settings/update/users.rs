use fleetdesk_model::{Profile, ProfileId};
use log::{debug, error, info};

use super::fetch::fetch_profiles;
use super::{CREATE_USER_FAILED, UPDATE_PROFILE_FAILED};
use crate::common::messages::{CrossDomainEvent, DomainUpdateResult};
use crate::common::task::Task;
use crate::domains::settings::SettingsDomain;
use crate::domains::settings::forms::NewUserForm;
use crate::domains::settings::messages::Message;
use crate::domains::settings::provision::provision_user;

/// Handle submit of the "Add User" modal
pub fn handle_submit_new_user(
    domain: &mut SettingsDomain,
) -> DomainUpdateResult {
    let request = match domain.state.new_user.validate() {
        Ok(request) => request,
        Err(issue) => {
            debug!("New user form rejected: {}", issue);
            domain.state.new_user_issue = Some(issue);
            return DomainUpdateResult::none();
        }
    };

    domain.state.new_user_issue = None;
    domain.state.error = None;

    info!("Creating user {}", request.email);
    let service = domain.service.clone();
    let redirect_to = domain.redirect_to.clone();
    DomainUpdateResult::task(Task::perform(
        async move {
            provision_user(service, request, redirect_to)
                .await
                .map_err(|e| format!("{e:#}"))
        },
        Message::UserCreated,
    ))
}

pub fn handle_user_created(
    domain: &mut SettingsDomain,
    result: Result<ProfileId, String>,
) -> DomainUpdateResult {
    match result {
        Ok(id) => {
            info!("User {} created", id);
            domain.state.show_new_user_form = false;
            domain.state.new_user = NewUserForm::default();
            DomainUpdateResult::task(fetch_profiles(domain))
                .add_event(CrossDomainEvent::ProfilesChanged)
        }
        Err(detail) => {
            error!("Failed to create user: {}", detail);
            domain.state.error = Some(CREATE_USER_FAILED.to_string());
            DomainUpdateResult::none()
        }
    }
}

/// Copy a listed profile into the edit buffer
pub fn handle_edit_profile(
    domain: &mut SettingsDomain,
    id: &ProfileId,
) -> DomainUpdateResult {
    match domain.state.profiles.iter().find(|p| &p.id == id) {
        Some(profile) => {
            domain.state.editing_profile = Some(profile.clone());
        }
        None => debug!("Profile {} is not in the list, nothing to edit", id),
    }
    DomainUpdateResult::none()
}

/// Apply a field edit to the profile being edited, if any
pub fn edit_buffer(
    domain: &mut SettingsDomain,
    edit: impl FnOnce(&mut Profile),
) -> DomainUpdateResult {
    match domain.state.editing_profile.as_mut() {
        Some(profile) => edit(profile),
        None => debug!("No profile is being edited, ignoring field change"),
    }
    DomainUpdateResult::none()
}

pub fn handle_save_profile(domain: &mut SettingsDomain) -> DomainUpdateResult {
    let Some(profile) = domain.state.editing_profile.as_ref() else {
        debug!("No profile is being edited, nothing to save");
        return DomainUpdateResult::none();
    };

    let id = profile.id.clone();
    let changes = profile.changes();
    domain.state.error = None;

    info!("Updating profile {}", id);
    let service = domain.service.clone();
    DomainUpdateResult::task(Task::perform(
        {
            let id = id.clone();
            async move {
                service
                    .update_profile(&id, changes)
                    .await
                    .map_err(|e| format!("{e:#}"))
            }
        },
        move |result| Message::ProfileSaved { id, result },
    ))
}

pub fn handle_profile_saved(
    domain: &mut SettingsDomain,
    id: ProfileId,
    result: Result<(), String>,
) -> DomainUpdateResult {
    match result {
        Ok(()) => {
            info!("Profile {} updated", id);
            if domain
                .state
                .editing_profile
                .as_ref()
                .is_some_and(|editing| editing.id == id)
            {
                domain.state.editing_profile = None;
            }
            DomainUpdateResult::task(fetch_profiles(domain))
                .add_event(CrossDomainEvent::ProfilesChanged)
        }
        Err(detail) => {
            error!("Failed to update profile {}: {}", id, detail);
            domain.state.error = Some(UPDATE_PROFILE_FAILED.to_string());
            DomainUpdateResult::none()
        }
    }
}
