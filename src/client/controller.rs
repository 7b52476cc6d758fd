use tracing::{debug, error, warn};

use crate::client::api::TodoApi;
use crate::client::state::{CreateForm, TodoAction, TodoListState};
use crate::todos::dto::{CreateTodoRequest, DeleteTodoRequest, ToggleTodoRequest, UpdateTodoRequest};
use crate::todos::TodoPatch;

/// Drives a [`TodoListState`] from procedure calls.
///
/// Every operation returns whether its state transition happened. Failures
/// are logged and never propagated.
pub struct TodoController<A> {
    api: A,
    state: TodoListState,
}

impl<A: TodoApi> TodoController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: TodoListState::new(),
        }
    }

    pub fn state(&self) -> &TodoListState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn set_form(&mut self, title: &str, description: &str) {
        self.state.reduce(TodoAction::FormChanged(CreateForm {
            title: title.to_string(),
            description: description.to_string(),
        }));
    }

    pub fn begin_edit(&mut self, id: i64) {
        self.state.reduce(TodoAction::BeginEdit(id));
    }

    pub fn edit_draft(&mut self, patch: TodoPatch) {
        self.state.reduce(TodoAction::DraftChanged(patch));
    }

    pub fn cancel_edit(&mut self) {
        self.state.reduce(TodoAction::CancelEdit);
    }

    pub async fn refresh(&mut self) -> bool {
        match self.api.get_todos().await {
            Ok(todos) => {
                debug!(count = todos.len(), "todos refreshed");
                self.state.reduce(TodoAction::Loaded(todos));
                true
            }
            Err(e) => {
                error!(error = %e, "refresh failed");
                false
            }
        }
    }

    pub async fn submit_create(&mut self) -> bool {
        if self.state.form.title.trim().is_empty() {
            warn!("create skipped: title is empty");
            return false;
        }
        let req = CreateTodoRequest {
            title: self.state.form.title.clone(),
            description: self.state.form.description(),
        };

        self.state.reduce(TodoAction::SubmitStarted);
        let result = self.api.create_todo(req).await;
        self.state.reduce(TodoAction::SubmitFinished);

        match result {
            Ok(todo) => {
                self.state.reduce(TodoAction::Created(todo));
                true
            }
            Err(e) => {
                error!(error = %e, "create failed");
                false
            }
        }
    }

    /// Sends the current edit draft.
    pub async fn submit_update(&mut self) -> bool {
        let Some(draft) = self.state.editing.clone() else {
            warn!("update skipped: not editing");
            return false;
        };

        self.state.reduce(TodoAction::SubmitStarted);
        let result = self
            .api
            .update_todo(UpdateTodoRequest::new(draft.id, draft.patch))
            .await;
        self.state.reduce(TodoAction::SubmitFinished);

        match result {
            Ok(todo) => {
                self.state.reduce(TodoAction::Updated(todo));
                true
            }
            Err(e) => {
                error!(error = %e, todo_id = draft.id, "update failed");
                false
            }
        }
    }

    /// Flips `completed` locally right away, then confirms with the server.
    /// On failure the previous value is restored.
    pub async fn toggle(&mut self, id: i64) -> bool {
        let Some(previous) = self.state.get(id).map(|t| t.completed) else {
            warn!(todo_id = id, "toggle skipped: unknown todo");
            return false;
        };
        let completed = !previous;
        self.state.reduce(TodoAction::ToggleOptimistic { id, completed });

        match self.api.toggle_todo(ToggleTodoRequest { id, completed }).await {
            Ok(todo) => {
                self.state.reduce(TodoAction::Toggled(todo));
                true
            }
            Err(e) => {
                error!(error = %e, todo_id = id, "toggle failed; rolling back");
                self.state.reduce(TodoAction::ToggleRolledBack { id, previous });
                false
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> bool {
        match self.api.delete_todo(DeleteTodoRequest { id }).await {
            Ok(res) => {
                if !res.success {
                    debug!(todo_id = id, "todo was already gone on the server");
                }
                self.state.reduce(TodoAction::Removed(id));
                true
            }
            Err(e) => {
                error!(error = %e, todo_id = id, "delete failed");
                false
            }
        }
    }
}
