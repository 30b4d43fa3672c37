//! User service layer

use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::models::{Page, PaginatedResponse};
use crate::store::{AnyStore, UserStore};
use crate::user::{User, UserCreate, UserUpdate};

/// User service for managing user records
#[derive(Clone)]
pub struct UserService {
    store: AnyStore,
}

impl UserService {
    pub fn new(store: AnyStore) -> Self {
        Self { store }
    }

    pub async fn create_user(&self, request: UserCreate) -> ApiResult<User> {
        request.validate()?;

        let user = self.store.insert_user(&request).await?;
        tracing::info!(user_id = %user.id, "User created");

        Ok(user)
    }

    pub async fn list_users(&self, page: Page) -> ApiResult<PaginatedResponse<User>> {
        let (users, total) = self.store.list_users(page).await?;
        Ok(PaginatedResponse::new(users, total, page))
    }

    pub async fn get_user(&self, id: Uuid) -> ApiResult<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| ApiError::user_not_found(id))
    }

    pub async fn update_user(&self, id: Uuid, request: UserUpdate) -> ApiResult<User> {
        request.validate()?;

        self.store
            .update_user(id, &request)
            .await?
            .ok_or_else(|| ApiError::user_not_found(id))
    }

    /// Delete a user together with every stock it owns
    pub async fn delete_user(&self, id: Uuid) -> ApiResult<()> {
        if !self.store.delete_user(id).await? {
            return Err(ApiError::user_not_found(id));
        }

        tracing::info!(user_id = %id, "User deleted with its stocks");
        Ok(())
    }
}
