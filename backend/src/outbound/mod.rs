//! Outbound adapters implementing the domain ports.

pub mod backend_api;
pub mod local;
