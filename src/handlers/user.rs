//! User-related API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
// Named only inside `#[utoipa::path]` so response refs resolve to bare component names
#[allow(unused_imports)]
use crate::error::ErrorResponse;
use crate::models::{ApiResponse, PaginatedResponse, PaginationParams};
#[allow(unused_imports)]
use crate::models::{
    PortfolioEnvelope, StockEnvelope, StockPageEnvelope, UserEnvelope, UserPageEnvelope,
};
use crate::portfolio::{Portfolio, PortfolioService};
use crate::stock::{Stock, StockCreate, StockService};
use crate::user::{User, UserCreate, UserService, UserUpdate};

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created", body = UserEnvelope),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn create_user(
    State(service): State<Arc<UserService>>,
    Json(request): Json<UserCreate>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let user = service.create_user(request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// List users with offset/limit pagination
#[utoipa::path(
    get,
    path = "/api/users",
    params(PaginationParams),
    responses((status = 200, description = "One page of users", body = UserPageEnvelope)),
    tag = "users"
)]
pub async fn list_users(
    State(service): State<Arc<UserService>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<User>>>, ApiError> {
    let page = service.list_users(params.page()).await?;

    Ok(Json(ApiResponse::ok(page)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserEnvelope),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = service.get_user(id).await?;

    Ok(Json(ApiResponse::ok(user)))
}

/// Partially update a user
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User updated", body = UserEnvelope),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn update_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UserUpdate>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = service.update_user(id, request).await?;

    Ok(Json(ApiResponse::ok(user)))
}

/// Delete a user and all of its stocks
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "User and owned stocks deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    service.delete_user(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Create a stock owned by the user
#[utoipa::path(
    post,
    path = "/api/users/{id}/stocks",
    params(("id" = Uuid, Path, description = "Owning user id")),
    request_body = StockCreate,
    responses(
        (status = 201, description = "Stock created", body = StockEnvelope),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn create_user_stock(
    State(service): State<Arc<StockService>>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<StockCreate>,
) -> Result<(StatusCode, Json<ApiResponse<Stock>>), ApiError> {
    let stock = service.create_stock_for_user(user_id, request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(stock))))
}

/// List the stocks owned by the user
#[utoipa::path(
    get,
    path = "/api/users/{id}/stocks",
    params(("id" = Uuid, Path, description = "Owning user id"), PaginationParams),
    responses(
        (status = 200, description = "One page of the user's stocks", body = StockPageEnvelope),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn list_user_stocks(
    State(service): State<Arc<StockService>>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<Stock>>>, ApiError> {
    let page = service.list_user_stocks(user_id, params.page()).await?;

    Ok(Json(ApiResponse::ok(page)))
}

/// Portfolio summary of the user's holdings
#[utoipa::path(
    get,
    path = "/api/users/{id}/portfolio",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Portfolio summary", body = PortfolioEnvelope),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_user_portfolio(
    State(service): State<Arc<PortfolioService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Portfolio>>, ApiError> {
    let portfolio = service.get_portfolio(user_id).await?;

    Ok(Json(ApiResponse::ok(portfolio)))
}
