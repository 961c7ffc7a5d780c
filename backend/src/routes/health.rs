//! Probe and metrics endpoints
//!
//! - `/health`: process is up
//! - `/health/ready`: database answers; 503 otherwise
//! - `/health/live`: liveness probe, never touches dependencies
//! - `/metrics`: Prometheus exposition of the application counters

use crate::{db, state::AppState};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Instant;

const SERVICE: &str = "gym-backend";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<DependencyChecks>,
}

impl HealthResponse {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            service: SERVICE,
            version: env!("CARGO_PKG_VERSION"),
            checks: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DependencyChecks {
    pub database: DependencyStatus,
}

#[derive(Debug, Serialize)]
pub struct DependencyStatus {
    pub status: &'static str,
    pub latency_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("alive"))
}

/// Readiness probe; the service only takes traffic once Postgres answers
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let started = Instant::now();
    let outcome = db::health_check(state.db()).await;
    let latency_ms = started.elapsed().as_millis();

    let (code, status, database) = match outcome {
        Ok(()) => (
            StatusCode::OK,
            "ready",
            DependencyStatus {
                status: "healthy",
                latency_ms,
                message: None,
            },
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "not_ready",
            DependencyStatus {
                status: "unhealthy",
                latency_ms,
                message: Some(e.to_string()),
            },
        ),
    };

    let mut body = HealthResponse::new(status);
    body.checks = Some(DependencyChecks { database });
    (code, Json(body))
}

/// Prometheus text exposition
///
/// Returns 404 when the binary did not install a recorder (tests, tools).
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics exporter not installed").into_response(),
    }
}
