//! Shared response envelopes and pagination types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub use crate::portfolio::Portfolio;
pub use crate::stock::Stock;
pub use crate::user::User;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 100;

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[aliases(
    UserEnvelope = ApiResponse<User>,
    StockEnvelope = ApiResponse<Stock>,
    PortfolioEnvelope = ApiResponse<Portfolio>,
    UserPageEnvelope = ApiResponse<UserPage>,
    StockPageEnvelope = ApiResponse<StockPage>
)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Pagination parameters
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Rows to skip (default 0)
    pub skip: Option<i64>,
    /// Maximum rows to return (default and cap 100)
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

/// Resolved offset/limit window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            skip: skip.unwrap_or(0).max(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new(None, None)
    }
}

/// Paginated response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[aliases(UserPage = PaginatedResponse<User>, StockPage = PaginatedResponse<Stock>)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: Page) -> Self {
        Self {
            data,
            total,
            skip: page.skip,
            limit: page.limit,
        }
    }
}
