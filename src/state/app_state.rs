//! Application state shared across handlers

use std::sync::Arc;

use crate::portfolio::PortfolioService;
use crate::stock::StockService;
use crate::store::AnyStore;
use crate::user::UserService;

use axum::extract::FromRef;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub stock_service: Arc<StockService>,
    pub portfolio_service: Arc<PortfolioService>,
    pub store: AnyStore,
}

impl AppState {
    /// Wire every service onto one store
    pub fn new(store: AnyStore) -> Self {
        Self {
            user_service: Arc::new(UserService::new(store.clone())),
            stock_service: Arc::new(StockService::new(store.clone())),
            portfolio_service: Arc::new(PortfolioService::new(store.clone())),
            store,
        }
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.user_service.clone()
    }
}

impl FromRef<AppState> for Arc<StockService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.stock_service.clone()
    }
}

impl FromRef<AppState> for Arc<PortfolioService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.portfolio_service.clone()
    }
}

impl FromRef<AppState> for AnyStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}
