pub mod fleet;

pub use fleet::{
    Call, Operation, TestFleetService, sample_profile, sample_vehicle,
};
