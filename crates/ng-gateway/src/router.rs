//! Route table and handlers.
//!
//! | Route                   | Success                                   |
//! |-------------------------|-------------------------------------------|
//! | `POST /check-username`  | `200 {"available": bool}`                 |
//! | `POST /register`        | `200 {"status":"registered","username"}`  |
//! | `GET /health`           | `200 {"status":"ok"}`                     |
//! | `GET /metrics`          | `200` counter snapshot                    |
//!
//! Other methods on these paths get `405` from axum's method router.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use ng_membership::{Metrics, MetricsSnapshot, RegistrationApi};
use std::sync::Arc;
use tracing::debug;

use crate::domain::config::CorsConfig;
use crate::domain::error::ApiError;
use crate::domain::types::{
    AvailabilityResponse, HealthResponse, RegistrationResponse, UsernameRequest,
};
use crate::middleware::{create_cors_layer, TracingLayer};
use tower::ServiceBuilder;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn RegistrationApi>,
    pub metrics: Arc<Metrics>,
}

/// Build the HTTP router with its middleware stack
pub fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TracingLayer::new())
        .layer(create_cors_layer(cors));

    Router::new()
        .route("/check-username", post(check_username))
        .route("/register", post(register_username))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_snapshot))
        .layer(middleware)
        .with_state(state)
}

async fn check_username(
    State(state): State<AppState>,
    body: Result<Json<UsernameRequest>, JsonRejection>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let Json(request) = body?;
    let available = state.api.check_availability(&request.username);
    debug!(username = %request.username, available, "Checked username");
    Ok(Json(AvailabilityResponse { available }))
}

async fn register_username(
    State(state): State<AppState>,
    body: Result<Json<UsernameRequest>, JsonRejection>,
) -> Result<Json<RegistrationResponse>, ApiError> {
    let Json(request) = body?;
    state.api.register(&request.username).await?;
    Ok(Json(RegistrationResponse::registered(request.username)))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn metrics_snapshot(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
