//! Infrastructure: the hosted data service client, service seams, config
//! loading and in-memory test doubles.

pub mod api_client;
pub mod config;
pub mod services;
pub mod testing;
