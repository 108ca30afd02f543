//! Admin/UI focused snapshot of the types surface.
//! Prefer importing from this module when working in presentation layers.

pub use super::error::ModelError;
pub use super::ids::{IdentityId, ProfileId, VehicleId};
pub use super::profile::{NewProfileRow, Profile, ProfileChanges, Role};
pub use super::vehicle::{
    NewVehicleRow, Vehicle, VehicleChanges, VehicleStatus,
};
