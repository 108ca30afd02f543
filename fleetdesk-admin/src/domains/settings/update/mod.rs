//! Message handling for the settings screen.

pub mod fetch;
pub mod users;
pub mod vehicles;

use log::debug;

use crate::common::messages::{CrossDomainEvent, DomainUpdateResult, Route};
use crate::domains::settings::SettingsDomain;
use crate::domains::settings::messages::Message;

// Banner text. Failure detail goes to the log only.
pub const FETCH_PROFILES_FAILED: &str = "Failed to fetch profiles";
pub const FETCH_VEHICLES_FAILED: &str = "Failed to fetch vehicles";
pub const CREATE_USER_FAILED: &str = "Failed to create user";
pub const CREATE_VEHICLE_FAILED: &str = "Failed to create vehicle";
pub const UPDATE_PROFILE_FAILED: &str = "Failed to update profile";
pub const UPDATE_VEHICLE_FAILED: &str = "Failed to update vehicle";

/// Handle settings domain messages
pub fn update_settings(
    domain: &mut SettingsDomain,
    message: Message,
) -> DomainUpdateResult {
    debug!("Settings update: {}", message.name());

    if !domain.state.session.is_admin() {
        return reject_non_admin(domain, &message);
    }

    match message {
        Message::Mount => {
            DomainUpdateResult::task(fetch::fetch_active_tab(domain))
        }
        Message::SelectTab(tab) => fetch::handle_select_tab(domain, tab),
        Message::SearchChanged(query) => {
            domain.state.search_query = query;
            DomainUpdateResult::none()
        }

        Message::ProfilesLoaded { token, result } => {
            fetch::handle_profiles_loaded(domain, token, result)
        }
        Message::VehiclesLoaded { token, result } => {
            fetch::handle_vehicles_loaded(domain, token, result)
        }

        // User creation
        Message::ShowNewUserForm => {
            domain.state.show_new_user_form = true;
            DomainUpdateResult::none()
        }
        Message::HideNewUserForm => {
            domain.state.show_new_user_form = false;
            DomainUpdateResult::none()
        }
        Message::NewUserEmail(email) => {
            domain.state.new_user.email = email;
            DomainUpdateResult::none()
        }
        Message::NewUserFullName(name) => {
            domain.state.new_user.full_name = name;
            DomainUpdateResult::none()
        }
        Message::NewUserBadgeNumber(badge) => {
            domain.state.new_user.badge_number = badge;
            DomainUpdateResult::none()
        }
        Message::NewUserRole(role) => {
            domain.state.new_user.role = role;
            DomainUpdateResult::none()
        }
        Message::NewUserPassword(password) => {
            domain.state.new_user.password = password;
            DomainUpdateResult::none()
        }
        Message::SubmitNewUser => users::handle_submit_new_user(domain),
        Message::UserCreated(result) => {
            users::handle_user_created(domain, result)
        }

        // Vehicle creation
        Message::ShowNewVehicleForm => {
            domain.state.show_new_vehicle_form = true;
            DomainUpdateResult::none()
        }
        Message::HideNewVehicleForm => {
            domain.state.show_new_vehicle_form = false;
            DomainUpdateResult::none()
        }
        Message::NewVehicleUnitNumber(unit) => {
            domain.state.new_vehicle.unit_number = unit;
            DomainUpdateResult::none()
        }
        Message::NewVehicleMake(make) => {
            domain.state.new_vehicle.make = make;
            DomainUpdateResult::none()
        }
        Message::NewVehicleModel(model) => {
            domain.state.new_vehicle.model = model;
            DomainUpdateResult::none()
        }
        Message::NewVehicleYear(year) => {
            vehicles::handle_new_vehicle_year(domain, &year)
        }
        Message::SubmitNewVehicle => {
            vehicles::handle_submit_new_vehicle(domain)
        }
        Message::VehicleCreated(result) => {
            vehicles::handle_vehicle_created(domain, result)
        }

        // Profile row edits
        Message::EditProfile(id) => users::handle_edit_profile(domain, &id),
        Message::EditProfileFullName(name) => {
            users::edit_buffer(domain, |profile| profile.full_name = name)
        }
        Message::EditProfileBadgeNumber(badge) => {
            users::edit_buffer(domain, |profile| {
                profile.badge_number = Some(badge)
            })
        }
        Message::EditProfileRole(role) => {
            users::edit_buffer(domain, |profile| profile.role = role)
        }
        Message::SaveProfile => users::handle_save_profile(domain),
        Message::CancelProfileEdit => {
            domain.state.editing_profile = None;
            DomainUpdateResult::none()
        }
        Message::ProfileSaved { id, result } => {
            users::handle_profile_saved(domain, id, result)
        }

        // Vehicle row edits
        Message::EditVehicle(id) => vehicles::handle_edit_vehicle(domain, &id),
        Message::EditVehicleUnitNumber(unit) => {
            vehicles::edit_buffer(domain, |vehicle| vehicle.unit_number = unit)
        }
        Message::EditVehicleMake(make) => {
            vehicles::edit_buffer(domain, |vehicle| vehicle.make = make)
        }
        Message::EditVehicleModel(model) => {
            vehicles::edit_buffer(domain, |vehicle| vehicle.model = model)
        }
        Message::EditVehicleYear(year) => {
            vehicles::handle_edit_vehicle_year(domain, &year)
        }
        Message::SaveVehicle => vehicles::handle_save_vehicle(domain),
        Message::CancelVehicleEdit => {
            domain.state.editing_vehicle = None;
            DomainUpdateResult::none()
        }
        Message::VehicleSaved { id, result } => {
            vehicles::handle_vehicle_saved(domain, id, result)
        }
    }
}

/// Non-admins never reach the service. Anything that would fetch sends them
/// back to the dashboard; everything else is dropped.
fn reject_non_admin(
    domain: &mut SettingsDomain,
    message: &Message,
) -> DomainUpdateResult {
    domain.state.loading = false;
    match message {
        Message::Mount | Message::SelectTab(_) => {
            debug!("Viewer is not an admin, leaving settings");
            DomainUpdateResult::none()
                .add_event(CrossDomainEvent::NavigateTo(Route::Dashboard))
        }
        _ => {
            debug!("Dropping {} from a non-admin viewer", message.name());
            DomainUpdateResult::none()
        }
    }
}
