use std::collections::BTreeMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::error::TodoError;
use crate::todos::repo::TodoStore;
use crate::todos::repo_types::{next_updated_at, truncate_to_micros, Todo, TodoPatch};

/// Non-persistent store. Rows live only as long as the process.
#[derive(Default)]
pub struct MemoryTodoStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, Todo>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn insert(&self, title: &str, description: Option<&str>) -> Result<Todo, TodoError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let now = truncate_to_micros(OffsetDateTime::now_utc());
        let todo = Todo {
            id: inner.last_id,
            title: title.to_string(),
            description: description.map(str::to_string),
            completed: false,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn select_all(&self) -> Result<Vec<Todo>, TodoError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn select_by_id(&self, id: i64) -> Result<Option<Todo>, TodoError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn update_by_id(&self, id: i64, patch: &TodoPatch) -> Result<Option<Todo>, TodoError> {
        let mut inner = self.inner.write().await;
        let Some(todo) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(todo);
        todo.updated_at = next_updated_at(todo.updated_at, OffsetDateTime::now_utc());
        Ok(Some(todo.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, TodoError> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.remove(&id).is_some())
    }
}
