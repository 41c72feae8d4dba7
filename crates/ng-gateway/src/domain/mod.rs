//! Domain types for the gateway: configuration, errors and JSON bodies.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigError, CorsConfig, GatewayConfig, HttpConfig};
pub use error::{ApiError, GatewayError};
pub use types::{
    AvailabilityResponse, ErrorResponse, HealthResponse, RegistrationResponse, UsernameRequest,
};
