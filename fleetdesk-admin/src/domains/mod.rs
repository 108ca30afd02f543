//! Domain modules
//!
//! Each domain owns its state, messages and update logic.

pub mod settings;
