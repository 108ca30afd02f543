use fleetdesk_model::{Profile, Vehicle};
use log::{error, info, warn};

use super::{FETCH_PROFILES_FAILED, FETCH_VEHICLES_FAILED};
use crate::common::messages::DomainUpdateResult;
use crate::common::task::Task;
use crate::domains::settings::SettingsDomain;
use crate::domains::settings::messages::Message;
use crate::domains::settings::state::{RequestToken, SettingsTab};

/// Request the full profile list. Supersedes any profile fetch in flight.
pub fn fetch_profiles(domain: &mut SettingsDomain) -> Task<Message> {
    let token = domain.state.profile_requests.next();
    domain.state.loading = true;
    let service = domain.service.clone();
    Task::perform(
        async move {
            service.list_profiles().await.map_err(|e| format!("{e:#}"))
        },
        move |result| Message::ProfilesLoaded { token, result },
    )
}

/// Request the full vehicle list. Supersedes any vehicle fetch in flight.
pub fn fetch_vehicles(domain: &mut SettingsDomain) -> Task<Message> {
    let token = domain.state.vehicle_requests.next();
    domain.state.loading = true;
    let service = domain.service.clone();
    Task::perform(
        async move {
            service.list_vehicles().await.map_err(|e| format!("{e:#}"))
        },
        move |result| Message::VehiclesLoaded { token, result },
    )
}

pub fn fetch_active_tab(domain: &mut SettingsDomain) -> Task<Message> {
    match domain.state.active_tab {
        SettingsTab::Users => fetch_profiles(domain),
        SettingsTab::Vehicles => fetch_vehicles(domain),
    }
}

/// Switching always re-fetches, even when the tab is already active.
pub fn handle_select_tab(
    domain: &mut SettingsDomain,
    tab: SettingsTab,
) -> DomainUpdateResult {
    domain.state.active_tab = tab;
    domain.state.search_query.clear();
    DomainUpdateResult::task(fetch_active_tab(domain))
}

pub fn handle_profiles_loaded(
    domain: &mut SettingsDomain,
    token: RequestToken,
    result: Result<Vec<Profile>, String>,
) -> DomainUpdateResult {
    let state = &mut domain.state;
    if !state.profile_requests.is_current(token) {
        warn!(
            "Discarding stale profile response {} (latest {})",
            token.get(),
            state.profile_requests.latest().get()
        );
        return DomainUpdateResult::none();
    }

    // Loading and the banner belong to whichever tab is shown.
    let shown = state.active_tab == SettingsTab::Users;
    match result {
        Ok(profiles) => {
            info!("Loaded {} profiles", profiles.len());
            state.profiles = profiles;
            if shown {
                state.error = None;
            }
        }
        Err(detail) => {
            error!("Failed to fetch profiles: {}", detail);
            if shown {
                state.error = Some(FETCH_PROFILES_FAILED.to_string());
            }
        }
    }
    if shown {
        state.loading = false;
    }
    DomainUpdateResult::none()
}

pub fn handle_vehicles_loaded(
    domain: &mut SettingsDomain,
    token: RequestToken,
    result: Result<Vec<Vehicle>, String>,
) -> DomainUpdateResult {
    let state = &mut domain.state;
    if !state.vehicle_requests.is_current(token) {
        warn!(
            "Discarding stale vehicle response {} (latest {})",
            token.get(),
            state.vehicle_requests.latest().get()
        );
        return DomainUpdateResult::none();
    }

    let shown = state.active_tab == SettingsTab::Vehicles;
    match result {
        Ok(vehicles) => {
            info!("Loaded {} vehicles", vehicles.len());
            state.vehicles = vehicles;
            if shown {
                state.error = None;
            }
        }
        Err(detail) => {
            error!("Failed to fetch vehicles: {}", detail);
            if shown {
                state.error = Some(FETCH_VEHICLES_FAILED.to_string());
            }
        }
    }
    if shown {
        state.loading = false;
    }
    DomainUpdateResult::none()
}
