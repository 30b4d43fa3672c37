//! Stock route definitions

use axum::{routing::get, Router};

use crate::handlers::*;
use crate::state::AppState;

pub fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/api/stocks", get(list_stocks).post(create_stock))
        .route(
            "/api/stocks/:id",
            get(get_stock).patch(update_stock).delete(delete_stock),
        )
}
