//! Generated OpenAPI document

use axum::Json;
use utoipa::OpenApi;

use crate::error::{ErrorDetails, ErrorResponse};
use crate::handlers;
use crate::handlers::health::HealthResponse;
use crate::models::{
    PortfolioEnvelope, StockEnvelope, StockPage, StockPageEnvelope, UserEnvelope, UserPage,
    UserPageEnvelope,
};
use crate::portfolio::Portfolio;
use crate::stock::{Stock, StockCreate, StockUpdate};
use crate::user::{User, UserCreate, UserUpdate};

#[derive(OpenApi)]
#[openapi(
    info(title = "Portfolio API", description = "Users and the stocks they hold"),
    paths(
        handlers::health::health_check,
        handlers::user::create_user,
        handlers::user::list_users,
        handlers::user::get_user,
        handlers::user::update_user,
        handlers::user::delete_user,
        handlers::user::create_user_stock,
        handlers::user::list_user_stocks,
        handlers::user::get_user_portfolio,
        handlers::stock::create_stock,
        handlers::stock::list_stocks,
        handlers::stock::get_stock,
        handlers::stock::update_stock,
        handlers::stock::delete_stock
    ),
    components(schemas(
        User,
        UserCreate,
        UserUpdate,
        Stock,
        StockCreate,
        StockUpdate,
        Portfolio,
        UserPage,
        StockPage,
        UserEnvelope,
        StockEnvelope,
        PortfolioEnvelope,
        UserPageEnvelope,
        StockPageEnvelope,
        ErrorResponse,
        ErrorDetails,
        HealthResponse
    )),
    tags(
        (name = "users", description = "User records and their holdings"),
        (name = "stocks", description = "Stock holdings"),
        (name = "health", description = "Liveness and store connectivity")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
