//! Stock API handlers

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
use crate::models::{ApiResponse, PaginatedResponse};
#[allow(unused_imports)]
use crate::models::{StockEnvelope, StockPageEnvelope};
use crate::stock::{Stock, StockCreate, StockFilter, StockService, StockUpdate};

/// Create a stock, optionally owned by an existing user
#[utoipa::path(
    post,
    path = "/api/stocks",
    request_body = StockCreate,
    responses(
        (status = 201, description = "Stock created", body = StockEnvelope),
        (status = 404, description = "Owning user not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "stocks"
)]
pub async fn create_stock(
    State(service): State<Arc<StockService>>,
    Json(request): Json<StockCreate>,
) -> Result<(StatusCode, Json<ApiResponse<Stock>>), ApiError> {
    let stock = service.create_stock(request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(stock))))
}

#[utoipa::path(
    get,
    path = "/api/stocks",
    params(StockFilter),
    responses((status = 200, description = "One page of stocks", body = StockPageEnvelope)),
    tag = "stocks"
)]
pub async fn list_stocks(
    State(service): State<Arc<StockService>>,
    Query(filter): Query<StockFilter>,
) -> Result<Json<ApiResponse<PaginatedResponse<Stock>>>, ApiError> {
    let page = service.list_stocks(filter).await?;

    Ok(Json(ApiResponse::ok(page)))
}

#[utoipa::path(
    get,
    path = "/api/stocks/{id}",
    params(("id" = Uuid, Path, description = "Stock id")),
    responses(
        (status = 200, description = "Stock found", body = StockEnvelope),
        (status = 404, description = "Stock not found", body = ErrorResponse)
    ),
    tag = "stocks"
)]
pub async fn get_stock(
    State(service): State<Arc<StockService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Stock>>, ApiError> {
    let stock = service.get_stock(id).await?;

    Ok(Json(ApiResponse::ok(stock)))
}

#[utoipa::path(
    patch,
    path = "/api/stocks/{id}",
    params(("id" = Uuid, Path, description = "Stock id")),
    request_body = StockUpdate,
    responses(
        (status = 200, description = "Stock updated", body = StockEnvelope),
        (status = 404, description = "Stock or new owner not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "stocks"
)]
pub async fn update_stock(
    State(service): State<Arc<StockService>>,
    Path(id): Path<Uuid>,
    Json(request): Json<StockUpdate>,
) -> Result<Json<ApiResponse<Stock>>, ApiError> {
    let stock = service.update_stock(id, request).await?;

    Ok(Json(ApiResponse::ok(stock)))
}

#[utoipa::path(
    delete,
    path = "/api/stocks/{id}",
    params(("id" = Uuid, Path, description = "Stock id")),
    responses(
        (status = 204, description = "Stock deleted"),
        (status = 404, description = "Stock not found", body = ErrorResponse)
    ),
    tag = "stocks"
)]
pub async fn delete_stock(
    State(service): State<Arc<StockService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    service.delete_stock(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
