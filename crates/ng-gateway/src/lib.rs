//! ng-gateway - HTTP interface for username availability and registration.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 HTTP GATEWAY                 │
//! ├──────────────────────────────────────────────┤
//! │  POST /check-username   POST /register       │
//! │  GET /health            GET /metrics         │
//! │                     │                        │
//! │      Middleware: Tracing → CORS              │
//! │                     │                        │
//! │        Arc<dyn RegistrationApi>              │
//! └─────────────────────┼────────────────────────┘
//!                       ▼
//!            RegistrationCoordinator
//!              ├── MembershipFilter
//!              └── NameStore
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use ng_gateway::{GatewayConfig, GatewayService};
//!
//! let service = GatewayService::new(GatewayConfig::default(), api, metrics)?;
//! service.serve(shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod router;
pub mod service;

pub use domain::config::{ConfigError, CorsConfig, GatewayConfig, HttpConfig};
pub use domain::error::{ApiError, GatewayError};
pub use router::{build_router, AppState};
pub use service::GatewayService;
