use fleetdesk_model::{Vehicle, VehicleId};
use log::{debug, error, info};

use super::fetch::fetch_vehicles;
use super::{CREATE_VEHICLE_FAILED, UPDATE_VEHICLE_FAILED};
use crate::common::messages::{CrossDomainEvent, DomainUpdateResult};
use crate::common::task::Task;
use crate::domains::settings::SettingsDomain;
use crate::domains::settings::forms::{NewVehicleForm, current_year, parse_year};
use crate::domains::settings::messages::Message;

pub fn handle_new_vehicle_year(
    domain: &mut SettingsDomain,
    input: &str,
) -> DomainUpdateResult {
    domain.state.new_vehicle.year = parse_year(input);
    DomainUpdateResult::none()
}

/// Handle submit of the "Add Vehicle" modal
pub fn handle_submit_new_vehicle(
    domain: &mut SettingsDomain,
) -> DomainUpdateResult {
    let row = match domain.state.new_vehicle.validate(current_year()) {
        Ok(row) => row,
        Err(issue) => {
            debug!("New vehicle form rejected: {}", issue);
            domain.state.new_vehicle_issue = Some(issue);
            return DomainUpdateResult::none();
        }
    };

    domain.state.new_vehicle_issue = None;
    domain.state.error = None;

    info!("Creating vehicle {}", row.unit_number);
    let service = domain.service.clone();
    DomainUpdateResult::task(Task::perform(
        async move {
            service
                .insert_vehicle(row)
                .await
                .map_err(|e| format!("{e:#}"))
        },
        Message::VehicleCreated,
    ))
}

pub fn handle_vehicle_created(
    domain: &mut SettingsDomain,
    result: Result<(), String>,
) -> DomainUpdateResult {
    match result {
        Ok(()) => {
            info!("Vehicle created");
            domain.state.show_new_vehicle_form = false;
            domain.state.new_vehicle = NewVehicleForm::default();
            DomainUpdateResult::task(fetch_vehicles(domain))
                .add_event(CrossDomainEvent::VehiclesChanged)
        }
        Err(detail) => {
            error!("Failed to create vehicle: {}", detail);
            domain.state.error = Some(CREATE_VEHICLE_FAILED.to_string());
            DomainUpdateResult::none()
        }
    }
}

/// Copy a listed vehicle into the edit buffer
pub fn handle_edit_vehicle(
    domain: &mut SettingsDomain,
    id: &VehicleId,
) -> DomainUpdateResult {
    match domain.state.vehicles.iter().find(|v| &v.id == id) {
        Some(vehicle) => {
            domain.state.editing_vehicle = Some(vehicle.clone());
        }
        None => debug!("Vehicle {} is not in the list, nothing to edit", id),
    }
    DomainUpdateResult::none()
}

/// Apply a field edit to the vehicle being edited, if any
pub fn edit_buffer(
    domain: &mut SettingsDomain,
    edit: impl FnOnce(&mut Vehicle),
) -> DomainUpdateResult {
    match domain.state.editing_vehicle.as_mut() {
        Some(vehicle) => edit(vehicle),
        None => debug!("No vehicle is being edited, ignoring field change"),
    }
    DomainUpdateResult::none()
}

/// Year edits are not range-checked; non-integers keep the previous year.
pub fn handle_edit_vehicle_year(
    domain: &mut SettingsDomain,
    input: &str,
) -> DomainUpdateResult {
    match parse_year(input) {
        Some(year) => edit_buffer(domain, |vehicle| vehicle.year = year),
        None => {
            debug!("Ignoring non-numeric year edit `{}`", input);
            DomainUpdateResult::none()
        }
    }
}

pub fn handle_save_vehicle(domain: &mut SettingsDomain) -> DomainUpdateResult {
    let Some(vehicle) = domain.state.editing_vehicle.as_ref() else {
        debug!("No vehicle is being edited, nothing to save");
        return DomainUpdateResult::none();
    };

    let id = vehicle.id.clone();
    let changes = vehicle.changes();
    domain.state.error = None;

    info!("Updating vehicle {}", id);
    let service = domain.service.clone();
    DomainUpdateResult::task(Task::perform(
        {
            let id = id.clone();
            async move {
                service
                    .update_vehicle(&id, changes)
                    .await
                    .map_err(|e| format!("{e:#}"))
            }
        },
        move |result| Message::VehicleSaved { id, result },
    ))
}

pub fn handle_vehicle_saved(
    domain: &mut SettingsDomain,
    id: VehicleId,
    result: Result<(), String>,
) -> DomainUpdateResult {
    match result {
        Ok(()) => {
            info!("Vehicle {} updated", id);
            if domain
                .state
                .editing_vehicle
                .as_ref()
                .is_some_and(|editing| editing.id == id)
            {
                domain.state.editing_vehicle = None;
            }
            DomainUpdateResult::task(fetch_vehicles(domain))
                .add_event(CrossDomainEvent::VehiclesChanged)
        }
        Err(detail) => {
            error!("Failed to update vehicle {}: {}", id, detail);
            domain.state.error = Some(UPDATE_VEHICLE_FAILED.to_string());
            DomainUpdateResult::none()
        }
    }
}
