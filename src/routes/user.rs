//! User route definitions

use axum::{routing::get, Router};

use crate::handlers::*;
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route(
            "/api/users/:id/stocks",
            get(list_user_stocks).post(create_user_stock),
        )
        .route("/api/users/:id/portfolio", get(get_user_portfolio))
}
