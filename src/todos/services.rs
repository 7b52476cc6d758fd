use std::sync::Arc;

use tracing::{debug, info};

use crate::error::TodoError;
use crate::todos::repo::TodoStore;
use crate::todos::repo_types::{Todo, TodoPatch};

/// Business rules on top of a [`TodoStore`].
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, title: &str, description: Option<&str>) -> Result<Todo, TodoError> {
        validate_title(title)?;
        let todo = self.store.insert(title, description).await?;
        info!(todo_id = todo.id, "todo created");
        Ok(todo)
    }

    pub async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        let todos = self.store.select_all().await?;
        debug!(count = todos.len(), "todos listed");
        Ok(todos)
    }

    /// Merges only the supplied fields. `updated_at` moves even for an empty patch.
    pub async fn update(&self, id: i64, patch: TodoPatch) -> Result<Todo, TodoError> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        let todo = self
            .store
            .update_by_id(id, &patch)
            .await?
            .ok_or(TodoError::NotFound { id })?;
        info!(todo_id = id, empty_patch = patch.is_empty(), "todo updated");
        Ok(todo)
    }

    pub async fn toggle(&self, id: i64, completed: bool) -> Result<Todo, TodoError> {
        let todo = self
            .store
            .update_by_id(id, &TodoPatch::completed(completed))
            .await?
            .ok_or(TodoError::NotFound { id })?;
        info!(todo_id = id, completed, "todo toggled");
        Ok(todo)
    }

    /// `false` when there was nothing to delete.
    pub async fn delete(&self, id: i64) -> Result<bool, TodoError> {
        let removed = self.store.delete_by_id(id).await?;
        info!(todo_id = id, removed, "todo delete");
        Ok(removed)
    }
}

fn validate_title(title: &str) -> Result<(), TodoError> {
    if title.trim().is_empty() {
        return Err(TodoError::validation("title", "must not be empty"));
    }
    Ok(())
}
