//! Portfolio summary for a user's holdings

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::stock::Stock;
use crate::store::{AnyStore, StockStore, UserStore};

/// Aggregated view of the stocks a user owns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Portfolio {
    pub user_id: Uuid,
    pub stocks: Vec<Stock>,
    /// Sum of price * quantity over active holdings
    pub total_value: f64,
    /// True when there is at least one holding and every holding is active
    pub is_complete: bool,
}

impl Portfolio {
    pub fn from_stocks(user_id: Uuid, stocks: Vec<Stock>) -> Self {
        let total_value = stocks
            .iter()
            .filter(|s| s.is_active)
            .map(Stock::value)
            .sum();
        let is_complete = !stocks.is_empty() && stocks.iter().all(|s| s.is_active);

        Self {
            user_id,
            stocks,
            total_value,
            is_complete,
        }
    }
}

/// Read-only portfolio queries
#[derive(Clone)]
pub struct PortfolioService {
    store: AnyStore,
}

impl PortfolioService {
    pub fn new(store: AnyStore) -> Self {
        Self { store }
    }

    pub async fn get_portfolio(&self, user_id: Uuid) -> ApiResult<Portfolio> {
        if !self.store.user_exists(user_id).await? {
            return Err(ApiError::user_not_found(user_id));
        }

        let stocks = self.store.stocks_for_user(user_id).await?;
        Ok(Portfolio::from_stocks(user_id, stocks))
    }
}
