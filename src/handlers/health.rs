use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::AnyStore;

pub async fn root() -> &'static str {
    "Portfolio API Server"
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
    pub database: String,
    pub version: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(store): State<AnyStore>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, database) = match store.healthy().await {
        Ok(()) => (StatusCode::OK, "healthy", "connected".to_string()),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "unhealthy",
            format!("error: {}", e),
        ),
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            store: store.name().to_string(),
            database,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
