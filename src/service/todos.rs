//! Todo records and store operations against SQLite.

use crate::error::AppError;
use crate::service::query::ListQuery;
use crate::service::validation::{CreateTodo, PatchTodo, PutTodo};
use crate::sql::{self, QueryBuf};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A live todo row. The wire representation is exactly these three fields.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

pub struct TodoService;

impl TodoService {
    /// Insert a new todo. The title is pre-checked for a case-insensitive
    /// collision; the unique index catches whatever races past the
    /// pre-check and maps to the same conflict.
    pub async fn create(pool: &SqlitePool, draft: &CreateTodo) -> Result<Todo, AppError> {
        Self::check_title_free(pool, &draft.title, None).await?;
        let q = sql::insert(&draft.title);
        Self::fetch_one(pool, &q).await
    }

    /// Fetch one todo by id.
    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Todo, AppError> {
        let q = sql::select_by_id(id);
        Self::fetch_optional(pool, &q)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Every live todo, newest first.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Todo>, AppError> {
        let q = sql::select_all();
        Self::fetch_all(pool, &q).await
    }

    /// Full replacement: both fields written. The row must exist before
    /// the title is checked against other rows, so a missing todo is 404
    /// even when the new title would also collide.
    pub async fn update_full(pool: &SqlitePool, id: i64, draft: &PutTodo) -> Result<Todo, AppError> {
        Self::get(pool, id).await?;
        Self::check_title_free(pool, &draft.title, Some(id)).await?;
        let q = sql::update(id, Some(&draft.title), Some(draft.completed));
        Self::fetch_optional(pool, &q)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Partial update: only the supplied fields are written.
    pub async fn update_partial(
        pool: &SqlitePool,
        id: i64,
        draft: &PatchTodo,
    ) -> Result<Todo, AppError> {
        Self::get(pool, id).await?;
        if let Some(title) = &draft.title {
            Self::check_title_free(pool, title, Some(id)).await?;
        }
        let q = sql::update(id, draft.title.as_deref(), draft.completed);
        Self::fetch_optional(pool, &q)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Idempotent completion toggle used by the convenience endpoints.
    pub async fn set_completed(pool: &SqlitePool, id: i64, value: bool) -> Result<Todo, AppError> {
        let q = sql::update(id, None, Some(value));
        Self::fetch_optional(pool, &q)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Delete by id. Frees the title (uniqueness only spans live rows);
    /// the id itself is never handed out again.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        let q = sql::delete(id);
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let result = query.execute(pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Rows matching the filter and search, before pagination.
    pub async fn count_matching(
        pool: &SqlitePool,
        completed: Option<bool>,
        search: Option<&str>,
    ) -> Result<i64, AppError> {
        let q = sql::count(completed, search);
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query_scalar::<_, i64>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_one(pool).await?)
    }

    /// One page of filtered, sorted rows plus the pre-pagination total.
    pub async fn query(pool: &SqlitePool, params: &ListQuery) -> Result<(Vec<Todo>, i64), AppError> {
        let total =
            Self::count_matching(pool, params.completed, params.search.as_deref()).await?;
        let q = sql::select_page(
            params.completed,
            params.search.as_deref(),
            params.sort,
            params.order,
            params.per_page,
            params.offset(),
        );
        let items = Self::fetch_all(pool, &q).await?;
        Ok((items, total))
    }

    /// Application-level half of the uniqueness guard: precise 409
    /// discrimination before the write. `exclude` skips the row being
    /// updated so a todo can keep (or re-case) its own title.
    async fn check_title_free(
        pool: &SqlitePool,
        title: &str,
        exclude: Option<i64>,
    ) -> Result<(), AppError> {
        let q = sql::select_conflicting(title, exclude);
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query_scalar::<_, i64>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        if query.fetch_optional(pool).await?.is_some() {
            return Err(AppError::DuplicateTitle);
        }
        Ok(())
    }

    async fn fetch_one(pool: &SqlitePool, q: &QueryBuf) -> Result<Todo, AppError> {
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query_as::<_, Todo>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        query.fetch_one(pool).await.map_err(Self::map_db)
    }

    async fn fetch_optional(pool: &SqlitePool, q: &QueryBuf) -> Result<Option<Todo>, AppError> {
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query_as::<_, Todo>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        query.fetch_optional(pool).await.map_err(Self::map_db)
    }

    async fn fetch_all(pool: &SqlitePool, q: &QueryBuf) -> Result<Vec<Todo>, AppError> {
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query_as::<_, Todo>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(pool).await?)
    }

    /// A unique-constraint violation is the database-level conflict
    /// outcome, not an internal failure.
    fn map_db(e: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(ref db) = e {
            if db.is_unique_violation() {
                return AppError::DuplicateTitle;
            }
        }
        AppError::Db(e)
    }
}
