use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::ModelError;
use crate::ids::VehicleId;

/// Earliest model year accepted by the creation form.
pub const YEAR_MIN: i32 = 1900;

/// Accepted model years for a new vehicle given the current calendar year.
pub fn year_bounds(current_year: i32) -> RangeInclusive<i32> {
    YEAR_MIN..=current_year + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VehicleStatus {
    #[default]
    Available,
    Assigned,
    OutOfService,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Assigned => "assigned",
            VehicleStatus::OutOfService => "out_of_service",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "available" => Ok(VehicleStatus::Available),
            "assigned" => Ok(VehicleStatus::Assigned),
            "out_of_service" => Ok(VehicleStatus::OutOfService),
            other => Err(ModelError::UnknownVehicleStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id: VehicleId,
    pub unit_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: VehicleStatus,
}

impl Vehicle {
    /// The fields an in-place edit is allowed to write back. Status is not
    /// among them.
    pub fn changes(&self) -> VehicleChanges {
        VehicleChanges {
            unit_number: self.unit_number.clone(),
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year,
        }
    }
}

/// Row inserted into the vehicles collection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewVehicleRow {
    pub unit_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: VehicleStatus,
}

impl NewVehicleRow {
    /// New vehicles always enter the fleet as available.
    pub fn available(
        unit_number: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            unit_number: unit_number.into(),
            make: make.into(),
            model: model.into(),
            year,
            status: VehicleStatus::Available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleChanges {
    pub unit_number: String,
    pub make: String,
    pub model: String,
    pub year: i32,
}
