//! User records and request schemas

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// User model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub age: Option<i32>,
    pub signup_ts: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserCreate {
    #[validate(length(min = 1, max = 100), custom = "validate_capitalized")]
    pub name: String,
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,
    pub signup_ts: Option<DateTime<Utc>>,
}

/// Request DTO for a partial user update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 100), custom = "validate_capitalized")]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,
    pub signup_ts: Option<DateTime<Utc>>,
}

impl UserUpdate {
    /// Apply the supplied fields to an existing record
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(age) = self.age {
            user.age = Some(age);
        }
        if let Some(signup_ts) = self.signup_ts {
            user.signup_ts = Some(signup_ts);
        }
    }
}

/// Names must start with an uppercase letter
fn validate_capitalized(name: &str) -> Result<(), ValidationError> {
    match name.chars().next() {
        Some(first) if first.is_uppercase() => Ok(()),
        _ => {
            let mut err = ValidationError::new("capitalized");
            err.message = Some("name must start with an uppercase letter".into());
            Err(err)
        }
    }
}
