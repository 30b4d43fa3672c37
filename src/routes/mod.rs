//! Route definitions for the portfolio API

mod stock;
mod user;

pub use stock::stock_routes;
pub use user::user_routes;

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::docs::{openapi_json, ApiDoc};
use crate::handlers::{health_check, root};
use crate::middleware;
use crate::state::AppState;

/// Full application router without CORS, which depends on deployment config
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(user_routes())
        .merge(stock_routes())
        .with_state(state)
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
}
