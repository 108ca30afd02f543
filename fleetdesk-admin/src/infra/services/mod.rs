pub mod fleet;

pub use fleet::{FleetApiAdapter, FleetDataService};
