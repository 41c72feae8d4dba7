//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for external callers
//! - Driven Ports (outbound) - Durable name storage

pub mod inbound;
pub mod outbound;

pub use inbound::RegistrationApi;
pub use outbound::NameStore;
