//! Middleware stack for the gateway.
//!
//! Layer order: Request → Tracing → CORS → Handler

pub mod cors;
pub mod tracing;

pub use cors::create_cors_layer;
pub use tracing::TracingLayer;
