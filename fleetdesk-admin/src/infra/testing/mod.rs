//! In-memory doubles for the data service, shared by tests and demo mode.

pub mod stubs;
