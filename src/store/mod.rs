//! Repository layer for users and their stock holdings
//!
//! Two backends implement the same traits: PostgreSQL for deployments and an
//! in-memory store for tests and local development. Both enforce the owning
//! user reference on stocks and cascade user deletes to their stocks.

use std::future::Future;

use uuid::Uuid;

use crate::error::ApiError;
use crate::models::Page;
use crate::stock::{Stock, StockCreate, StockFilter, StockUpdate};
use crate::user::{User, UserCreate, UserUpdate};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("user {0} does not exist")]
    UnknownUser(Uuid),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(e) => e.into(),
            StoreError::UnknownUser(id) => ApiError::user_not_found(id),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait UserStore {
    /// Insert a validated user
    fn insert_user(&self, request: &UserCreate) -> impl Future<Output = StoreResult<User>> + Send;

    /// One page of users ordered by creation time, plus the total count
    fn list_users(&self, page: Page) -> impl Future<Output = StoreResult<(Vec<User>, i64)>> + Send;

    fn get_user(&self, id: Uuid) -> impl Future<Output = StoreResult<Option<User>>> + Send;

    fn user_exists(&self, id: Uuid) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Apply a partial update, `None` if the user does not exist
    fn update_user(
        &self,
        id: Uuid,
        request: &UserUpdate,
    ) -> impl Future<Output = StoreResult<Option<User>>> + Send;

    /// Delete a user and every stock it owns, `false` if the user does not exist
    fn delete_user(&self, id: Uuid) -> impl Future<Output = StoreResult<bool>> + Send;
}

pub trait StockStore {
    /// Insert a validated stock; an unknown `user_id` yields `StoreError::UnknownUser`
    fn insert_stock(&self, request: &StockCreate) -> impl Future<Output = StoreResult<Stock>> + Send;

    fn list_stocks(
        &self,
        filter: &StockFilter,
        page: Page,
    ) -> impl Future<Output = StoreResult<(Vec<Stock>, i64)>> + Send;

    fn get_stock(&self, id: Uuid) -> impl Future<Output = StoreResult<Option<Stock>>> + Send;

    /// Every stock owned by a user ordered by creation time
    fn stocks_for_user(&self, user_id: Uuid) -> impl Future<Output = StoreResult<Vec<Stock>>> + Send;

    fn update_stock(
        &self,
        id: Uuid,
        request: &StockUpdate,
    ) -> impl Future<Output = StoreResult<Option<Stock>>> + Send;

    fn delete_stock(&self, id: Uuid) -> impl Future<Output = StoreResult<bool>> + Send;
}

/// Concrete store selected at startup
#[derive(Debug, Clone)]
pub enum AnyStore {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl AnyStore {
    pub fn name(&self) -> &'static str {
        match self {
            AnyStore::Postgres(_) => "postgres",
            AnyStore::Memory(_) => "memory",
        }
    }

    /// Connectivity probe for the health endpoint
    pub async fn healthy(&self) -> Result<(), String> {
        match self {
            AnyStore::Postgres(store) => store.healthy().await,
            AnyStore::Memory(_) => Ok(()),
        }
    }
}

impl From<PgStore> for AnyStore {
    fn from(store: PgStore) -> Self {
        AnyStore::Postgres(store)
    }
}

impl From<MemoryStore> for AnyStore {
    fn from(store: MemoryStore) -> Self {
        AnyStore::Memory(store)
    }
}

impl UserStore for AnyStore {
    async fn insert_user(&self, request: &UserCreate) -> StoreResult<User> {
        match self {
            AnyStore::Postgres(store) => store.insert_user(request).await,
            AnyStore::Memory(store) => store.insert_user(request).await,
        }
    }

    async fn list_users(&self, page: Page) -> StoreResult<(Vec<User>, i64)> {
        match self {
            AnyStore::Postgres(store) => store.list_users(page).await,
            AnyStore::Memory(store) => store.list_users(page).await,
        }
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        match self {
            AnyStore::Postgres(store) => store.get_user(id).await,
            AnyStore::Memory(store) => store.get_user(id).await,
        }
    }

    async fn user_exists(&self, id: Uuid) -> StoreResult<bool> {
        match self {
            AnyStore::Postgres(store) => store.user_exists(id).await,
            AnyStore::Memory(store) => store.user_exists(id).await,
        }
    }

    async fn update_user(&self, id: Uuid, request: &UserUpdate) -> StoreResult<Option<User>> {
        match self {
            AnyStore::Postgres(store) => store.update_user(id, request).await,
            AnyStore::Memory(store) => store.update_user(id, request).await,
        }
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        match self {
            AnyStore::Postgres(store) => store.delete_user(id).await,
            AnyStore::Memory(store) => store.delete_user(id).await,
        }
    }
}

impl StockStore for AnyStore {
    async fn insert_stock(&self, request: &StockCreate) -> StoreResult<Stock> {
        match self {
            AnyStore::Postgres(store) => store.insert_stock(request).await,
            AnyStore::Memory(store) => store.insert_stock(request).await,
        }
    }

    async fn list_stocks(&self, filter: &StockFilter, page: Page) -> StoreResult<(Vec<Stock>, i64)> {
        match self {
            AnyStore::Postgres(store) => store.list_stocks(filter, page).await,
            AnyStore::Memory(store) => store.list_stocks(filter, page).await,
        }
    }

    async fn get_stock(&self, id: Uuid) -> StoreResult<Option<Stock>> {
        match self {
            AnyStore::Postgres(store) => store.get_stock(id).await,
            AnyStore::Memory(store) => store.get_stock(id).await,
        }
    }

    async fn stocks_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Stock>> {
        match self {
            AnyStore::Postgres(store) => store.stocks_for_user(user_id).await,
            AnyStore::Memory(store) => store.stocks_for_user(user_id).await,
        }
    }

    async fn update_stock(&self, id: Uuid, request: &StockUpdate) -> StoreResult<Option<Stock>> {
        match self {
            AnyStore::Postgres(store) => store.update_stock(id, request).await,
            AnyStore::Memory(store) => store.update_stock(id, request).await,
        }
    }

    async fn delete_stock(&self, id: Uuid) -> StoreResult<bool> {
        match self {
            AnyStore::Postgres(store) => store.delete_stock(id).await,
            AnyStore::Memory(store) => store.delete_stock(id).await,
        }
    }
}
