use std::fmt::{self, Display};

/// Errors produced by model parsing routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    UnknownRole(String),
    UnknownVehicleStatus(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownRole(raw) => write!(f, "unknown role: {raw}"),
            ModelError::UnknownVehicleStatus(raw) => {
                write!(f, "unknown vehicle status: {raw}")
            }
        }
    }
}

impl std::error::Error for ModelError {}
