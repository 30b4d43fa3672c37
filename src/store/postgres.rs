use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{StockStore, StoreError, StoreResult, UserStore};
use crate::models::Page;
use crate::stock::{Stock, StockCreate, StockFilter, StockUpdate};
use crate::user::{User, UserCreate, UserUpdate};

/// Postgres SQLSTATE for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Clone)]
pub struct PgStore {
    db_pool: PgPool,
}

impl PgStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub async fn healthy(&self) -> Result<(), String> {
        crate::db::check_health(&self.db_pool)
            .await
            .map_err(|e| e.to_string())
    }
}

/// Turn a stocks.user_id foreign key violation into `UnknownUser`
fn map_owner_error(err: sqlx::Error, user_id: Option<Uuid>) -> StoreError {
    if let (sqlx::Error::Database(db_err), Some(user_id)) = (&err, user_id) {
        if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            return StoreError::UnknownUser(user_id);
        }
    }
    StoreError::Database(err)
}

fn push_stock_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &StockFilter) {
    if let Some(user_id) = filter.user_id {
        builder.push(" AND user_id = ");
        builder.push_bind(user_id);
    }

    if let Some(is_active) = filter.is_active {
        builder.push(" AND is_active = ");
        builder.push_bind(is_active);
    }
}

impl UserStore for PgStore {
    async fn insert_user(&self, request: &UserCreate) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, age, signup_ts, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(request.age)
        .bind(request.signup_ts)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await?;

        Ok(user)
    }

    async fn list_users(&self, page: Page) -> StoreResult<(Vec<User>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db_pool)
            .await?;

        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY created_at, id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.db_pool)
        .await?;

        Ok((users, total))
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(user)
    }

    async fn user_exists(&self, id: Uuid) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.db_pool)
            .await?;

        Ok(exists)
    }

    async fn update_user(&self, id: Uuid, request: &UserUpdate) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                age = COALESCE($3, age),
                signup_ts = COALESCE($4, signup_ts)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref())
        .bind(request.age)
        .bind(request.signup_ts)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        // stocks.user_id is declared ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl StockStore for PgStore {
    async fn insert_stock(&self, request: &StockCreate) -> StoreResult<Stock> {
        sqlx::query_as::<_, Stock>(
            r#"
            INSERT INTO stocks (id, name, price, quantity, is_active, tags, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(request.price)
        .bind(request.quantity)
        .bind(request.is_active)
        .bind(&request.tags)
        .bind(request.user_id)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| map_owner_error(e, request.user_id))
    }

    async fn list_stocks(&self, filter: &StockFilter, page: Page) -> StoreResult<(Vec<Stock>, i64)> {
        let mut query_builder = QueryBuilder::<Postgres>::new("SELECT * FROM stocks WHERE 1=1");
        let mut count_builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM stocks WHERE 1=1");

        push_stock_filters(&mut query_builder, filter);
        push_stock_filters(&mut count_builder, filter);

        let total: i64 = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.db_pool)
            .await?;

        query_builder.push(" ORDER BY created_at, id LIMIT ");
        query_builder.push_bind(page.limit);
        query_builder.push(" OFFSET ");
        query_builder.push_bind(page.skip);

        let stocks = query_builder
            .build_query_as::<Stock>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok((stocks, total))
    }

    async fn get_stock(&self, id: Uuid) -> StoreResult<Option<Stock>> {
        let stock = sqlx::query_as::<_, Stock>("SELECT * FROM stocks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(stock)
    }

    async fn stocks_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Stock>> {
        let stocks = sqlx::query_as::<_, Stock>(
            "SELECT * FROM stocks WHERE user_id = $1 ORDER BY created_at, id",
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(stocks)
    }

    async fn update_stock(&self, id: Uuid, request: &StockUpdate) -> StoreResult<Option<Stock>> {
        sqlx::query_as::<_, Stock>(
            r#"
            UPDATE stocks
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                quantity = COALESCE($4, quantity),
                is_active = COALESCE($5, is_active),
                tags = COALESCE($6, tags),
                user_id = COALESCE($7, user_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref())
        .bind(request.price)
        .bind(request.quantity)
        .bind(request.is_active)
        .bind(&request.tags)
        .bind(request.user_id)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| map_owner_error(e, request.user_id))
    }

    async fn delete_stock(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM stocks WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
