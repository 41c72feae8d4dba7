//! # Integration Tests
//!
//! Flows that cross crate boundaries: filter, store, coordinator, gateway
//! and node runtime wired together the way the binary wires them.

pub mod http_flows;
pub mod registration_flows;
