//! Local search over the fetched lists.
//!
//! Matching is a case-insensitive substring test over a fixed set of fields.
//! The result keeps the order of the full list.

use fleetdesk_model::{Profile, Vehicle};

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// `needle` must already be lowercased.
pub fn profile_matches(profile: &Profile, needle: &str) -> bool {
    contains(&profile.full_name, needle)
        || contains(&profile.email, needle)
        || profile
            .badge_number
            .as_deref()
            .is_some_and(|badge| contains(badge, needle))
}

/// `needle` must already be lowercased.
pub fn vehicle_matches(vehicle: &Vehicle, needle: &str) -> bool {
    contains(&vehicle.unit_number, needle)
        || contains(&vehicle.make, needle)
        || contains(&vehicle.model, needle)
        || vehicle.year.to_string().contains(needle)
}

pub fn filter_profiles<'a>(
    profiles: &'a [Profile],
    query: &str,
) -> Vec<&'a Profile> {
    let needle = query.to_lowercase();
    profiles
        .iter()
        .filter(|profile| profile_matches(profile, &needle))
        .collect()
}

pub fn filter_vehicles<'a>(
    vehicles: &'a [Vehicle],
    query: &str,
) -> Vec<&'a Vehicle> {
    let needle = query.to_lowercase();
    vehicles
        .iter()
        .filter(|vehicle| vehicle_matches(vehicle, &needle))
        .collect()
}
