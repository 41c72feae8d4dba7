//! Service Layer
//!
//! Contains the application service that orchestrates the membership filter
//! and the name store via ports.

pub mod registration_coordinator;

pub use registration_coordinator::RegistrationCoordinator;
