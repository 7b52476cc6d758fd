use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::TodoError;
use crate::todos::repo_types::{Todo, TodoPatch};

/// Durable keyed collection of todo rows.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Inserts a row, assigning `id`, `created_at` and `updated_at`.
    async fn insert(&self, title: &str, description: Option<&str>) -> Result<Todo, TodoError>;
    /// All rows in insertion order.
    async fn select_all(&self) -> Result<Vec<Todo>, TodoError>;
    async fn select_by_id(&self, id: i64) -> Result<Option<Todo>, TodoError>;
    /// Merges `patch` and refreshes `updated_at`. `None` if the row is missing.
    async fn update_by_id(&self, id: i64, patch: &TodoPatch) -> Result<Option<Todo>, TodoError>;
    /// Returns whether a row existed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, TodoError>;
}

#[derive(Clone)]
pub struct PgTodoStore {
    db: PgPool,
}

impl PgTodoStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn insert(&self, title: &str, description: Option<&str>) -> Result<Todo, TodoError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(description) // Option<&str> → NULL allowed
        .fetch_one(&self.db)
        .await?;
        Ok(todo)
    }

    async fn select_all(&self) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, completed, created_at, updated_at
            FROM todos
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn select_by_id(&self, id: i64) -> Result<Option<Todo>, TodoError> {
        let row = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, completed, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn update_by_id(&self, id: i64, patch: &TodoPatch) -> Result<Option<Todo>, TodoError> {
        // $3 tells "set description" apart from "leave it", since $4 may be NULL either way.
        let row = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
               SET title       = COALESCE($2, title),
                   description = CASE WHEN $3 THEN $4 ELSE description END,
                   completed   = COALESCE($5, completed),
                   updated_at  = GREATEST(now(), updated_at + INTERVAL '1 microsecond')
             WHERE id = $1
            RETURNING id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.description.is_some())
        .bind(patch.description.clone().flatten())
        .bind(patch.completed)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, TodoError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
