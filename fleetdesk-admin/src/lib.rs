//! FleetDesk admin library
//!
//! The administrative settings screen of FleetDesk: tabbed management of user
//! profiles and fleet vehicles stored in the hosted data service. The screen
//! is a plain state struct, a message-driven update function and a pure
//! projection into a [`domains::settings::view::Screen`]; no UI framework is
//! involved.
//!
//! Notes
//! - Public items are subject to change while the screen stabilizes.
//! - The `fleetdesk-admin` binary is an operator console over the same
//!   surfaces; the library is exposed mainly to enable testing and reuse.

pub mod common;
pub mod domains;
pub mod infra;
pub mod runtime;

pub use domains::settings::SettingsDomain;
pub use runtime::Runtime;
