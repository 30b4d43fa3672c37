use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StockStore, StoreError, StoreResult, UserStore};
use crate::models::Page;
use crate::stock::{Stock, StockCreate, StockFilter, StockUpdate};
use crate::user::{User, UserCreate, UserUpdate};

/// Rows are kept in insertion order, which is creation order.
#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    stocks: Vec<Stock>,
}

impl Tables {
    fn has_user(&self, id: Uuid) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn check_owner(&self, user_id: Option<Uuid>) -> StoreResult<()> {
        match user_id {
            Some(id) if !self.has_user(id) => Err(StoreError::UnknownUser(id)),
            _ => Ok(()),
        }
    }
}

fn paginate<T>(rows: impl Iterator<Item = T>, page: Page) -> (Vec<T>, i64) {
    let rows: Vec<T> = rows.collect();
    let total = rows.len() as i64;
    let data = rows
        .into_iter()
        .skip(page.skip as usize)
        .take(page.limit as usize)
        .collect();
    (data, total)
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryStore {
    async fn insert_user(&self, request: &UserCreate) -> StoreResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            age: request.age,
            signup_ts: request.signup_ts,
            created_at: Utc::now(),
        };

        self.tables.write().await.users.push(user.clone());
        Ok(user)
    }

    async fn list_users(&self, page: Page) -> StoreResult<(Vec<User>, i64)> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.users.iter().cloned(), page))
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn user_exists(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.tables.read().await.has_user(id))
    }

    async fn update_user(&self, id: Uuid, request: &UserUpdate) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        request.apply_to(user);
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }

        tables.stocks.retain(|s| s.user_id != Some(id));
        Ok(true)
    }
}

impl StockStore for MemoryStore {
    async fn insert_stock(&self, request: &StockCreate) -> StoreResult<Stock> {
        let mut tables = self.tables.write().await;
        tables.check_owner(request.user_id)?;

        let stock = Stock {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            price: request.price,
            quantity: request.quantity,
            is_active: request.is_active,
            tags: request.tags.clone(),
            user_id: request.user_id,
            created_at: Utc::now(),
        };

        tables.stocks.push(stock.clone());
        Ok(stock)
    }

    async fn list_stocks(&self, filter: &StockFilter, page: Page) -> StoreResult<(Vec<Stock>, i64)> {
        let tables = self.tables.read().await;
        let rows = tables
            .stocks
            .iter()
            .filter(|s| filter.user_id.map_or(true, |id| s.user_id == Some(id)))
            .filter(|s| filter.is_active.map_or(true, |active| s.is_active == active))
            .cloned();

        Ok(paginate(rows, page))
    }

    async fn get_stock(&self, id: Uuid) -> StoreResult<Option<Stock>> {
        let tables = self.tables.read().await;
        Ok(tables.stocks.iter().find(|s| s.id == id).cloned())
    }

    async fn stocks_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Stock>> {
        let tables = self.tables.read().await;
        Ok(tables
            .stocks
            .iter()
            .filter(|s| s.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn update_stock(&self, id: Uuid, request: &StockUpdate) -> StoreResult<Option<Stock>> {
        let mut tables = self.tables.write().await;
        if !tables.stocks.iter().any(|s| s.id == id) {
            return Ok(None);
        }
        tables.check_owner(request.user_id)?;

        let stock = tables
            .stocks
            .iter_mut()
            .find(|s| s.id == id)
            .map(|stock| {
                request.apply_to(stock);
                stock.clone()
            });
        Ok(stock)
    }

    async fn delete_stock(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.stocks.len();
        tables.stocks.retain(|s| s.id != id);
        Ok(tables.stocks.len() != before)
    }
}
