//! Stock service layer

use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::models::{Page, PaginatedResponse};
use crate::stock::{Stock, StockCreate, StockFilter, StockUpdate};
use crate::store::{AnyStore, StockStore, UserStore};

/// Stock service for managing holdings, optionally scoped to a user
#[derive(Clone)]
pub struct StockService {
    store: AnyStore,
}

impl StockService {
    pub fn new(store: AnyStore) -> Self {
        Self { store }
    }

    async fn ensure_user(&self, user_id: Uuid) -> ApiResult<()> {
        if self.store.user_exists(user_id).await? {
            Ok(())
        } else {
            Err(ApiError::user_not_found(user_id))
        }
    }

    pub async fn create_stock(&self, request: StockCreate) -> ApiResult<Stock> {
        request.validate()?;

        if let Some(user_id) = request.user_id {
            self.ensure_user(user_id).await?;
        }

        let stock = self.store.insert_stock(&request).await?;
        tracing::info!(stock_id = %stock.id, symbol = %stock.name, "Stock created");

        Ok(stock)
    }

    /// Create a stock owned by `user_id`, overriding any owner in the body
    pub async fn create_stock_for_user(
        &self,
        user_id: Uuid,
        mut request: StockCreate,
    ) -> ApiResult<Stock> {
        request.validate()?;
        self.ensure_user(user_id).await?;

        request.user_id = Some(user_id);
        let stock = self.store.insert_stock(&request).await?;
        tracing::info!(stock_id = %stock.id, user_id = %user_id, "Stock created for user");

        Ok(stock)
    }

    pub async fn list_stocks(&self, filter: StockFilter) -> ApiResult<PaginatedResponse<Stock>> {
        let page = Page::new(filter.skip, filter.limit);
        let (stocks, total) = self.store.list_stocks(&filter, page).await?;

        Ok(PaginatedResponse::new(stocks, total, page))
    }

    pub async fn list_user_stocks(
        &self,
        user_id: Uuid,
        page: Page,
    ) -> ApiResult<PaginatedResponse<Stock>> {
        self.ensure_user(user_id).await?;

        let filter = StockFilter {
            user_id: Some(user_id),
            ..Default::default()
        };
        let (stocks, total) = self.store.list_stocks(&filter, page).await?;

        Ok(PaginatedResponse::new(stocks, total, page))
    }

    pub async fn get_stock(&self, id: Uuid) -> ApiResult<Stock> {
        self.store
            .get_stock(id)
            .await?
            .ok_or_else(|| ApiError::stock_not_found(id))
    }

    pub async fn update_stock(&self, id: Uuid, request: StockUpdate) -> ApiResult<Stock> {
        request.validate()?;

        if let Some(user_id) = request.user_id {
            self.ensure_user(user_id).await?;
        }

        self.store
            .update_stock(id, &request)
            .await?
            .ok_or_else(|| ApiError::stock_not_found(id))
    }

    pub async fn delete_stock(&self, id: Uuid) -> ApiResult<()> {
        if !self.store.delete_stock(id).await? {
            return Err(ApiError::stock_not_found(id));
        }

        tracing::info!(stock_id = %id, "Stock deleted");
        Ok(())
    }
}
