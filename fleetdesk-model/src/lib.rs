//! Core data model definitions shared across FleetDesk crates.
//!
//! Both entities are owned by the hosted data service; the types here are the
//! transient in-memory copies plus the row payloads sent on insert/update.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod prelude;
pub mod profile;
pub mod vehicle;

pub use error::ModelError;
pub use ids::{IdentityId, ProfileId, VehicleId};
pub use profile::{
    NewProfileRow, Profile, ProfileChanges, Role, normalize_badge,
};
pub use vehicle::{
    NewVehicleRow, Vehicle, VehicleChanges, VehicleStatus, YEAR_MIN,
    year_bounds,
};
