//! Stock records and request schemas

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const MAX_TAGS: usize = 16;
pub const MAX_TAG_LEN: usize = 32;
/// Keeps price * quantity summed over any portfolio finite
pub const MAX_PRICE: f64 = 1_000_000_000.0;

/// Stock holding model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq, ToSchema)]
pub struct Stock {
    pub id: Uuid,
    /// Ticker symbol
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub is_active: bool,
    pub tags: Vec<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Stock {
    /// Market value of the holding
    pub fn value(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

fn default_true() -> bool {
    true
}

/// Request DTO for creating a stock
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_fields"))]
pub struct StockCreate {
    #[validate(length(min = 1, max = 16))]
    pub name: String,
    pub price: f64,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    #[validate(length(max = 16))]
    pub tags: Vec<String>,
    pub user_id: Option<Uuid>,
}

/// Request DTO for a partial stock update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_fields"))]
pub struct StockUpdate {
    #[validate(length(min = 1, max = 16))]
    pub name: Option<String>,
    pub price: Option<f64>,
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
    pub is_active: Option<bool>,
    #[validate(length(max = 16))]
    pub tags: Option<Vec<String>>,
    /// Reassign the holding to another user
    pub user_id: Option<Uuid>,
}

impl StockUpdate {
    /// Apply the supplied fields to an existing record
    pub fn apply_to(&self, stock: &mut Stock) {
        if let Some(name) = &self.name {
            stock.name = name.clone();
        }
        if let Some(price) = self.price {
            stock.price = price;
        }
        if let Some(quantity) = self.quantity {
            stock.quantity = quantity;
        }
        if let Some(is_active) = self.is_active {
            stock.is_active = is_active;
        }
        if let Some(tags) = &self.tags {
            stock.tags = tags.clone();
        }
        if let Some(user_id) = self.user_id {
            stock.user_id = Some(user_id);
        }
    }
}

/// Query parameters for listing stocks
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StockFilter {
    pub user_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

fn check_price(price: f64) -> Result<(), ValidationError> {
    // NaN fails the comparison as well
    if price > 0.0 && price <= MAX_PRICE {
        return Ok(());
    }
    let mut err = ValidationError::new("price_range");
    err.message = Some(format!("price must be greater than 0 and at most {}", MAX_PRICE).into());
    Err(err)
}

fn check_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags
        .iter()
        .all(|tag| (1..=MAX_TAG_LEN).contains(&tag.chars().count()))
    {
        return Ok(());
    }
    let mut err = ValidationError::new("tag_length");
    err.message = Some(format!("each tag must be 1 to {} characters", MAX_TAG_LEN).into());
    Err(err)
}

fn validate_create_fields(request: &StockCreate) -> Result<(), ValidationError> {
    check_price(request.price)?;
    check_tags(&request.tags)
}

fn validate_update_fields(request: &StockUpdate) -> Result<(), ValidationError> {
    if let Some(price) = request.price {
        check_price(price)?;
    }
    if let Some(tags) = &request.tags {
        check_tags(tags)?;
    }
    Ok(())
}
