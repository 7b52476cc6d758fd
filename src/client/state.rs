//! Client-side todo list as an explicit state container.
//!
//! All changes go through [`TodoListState::reduce`]; the controller feeds it
//! actions built from confirmed server responses or optimistic guesses.

use crate::todos::{Todo, TodoPatch};

/// Fields of the "new todo" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub title: String,
    pub description: String,
}

impl CreateForm {
    /// Blank description means "no description".
    pub fn description(&self) -> Option<String> {
        let trimmed = self.description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Record being edited and the changes made to it so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: i64,
    pub patch: TodoPatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoAction {
    /// Whole list from `getTodos`.
    Loaded(Vec<Todo>),
    FormChanged(CreateForm),
    SubmitStarted,
    SubmitFinished,
    Created(Todo),
    BeginEdit(i64),
    DraftChanged(TodoPatch),
    CancelEdit,
    /// Server copy after `updateTodo`; leaves edit mode for that record.
    Updated(Todo),
    /// Server copy after `toggleTodo`; an open draft is kept.
    Toggled(Todo),
    ToggleOptimistic { id: i64, completed: bool },
    ToggleRolledBack { id: i64, previous: bool },
    Removed(i64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoListState {
    pub todos: Vec<Todo>,
    pub form: CreateForm,
    pub editing: Option<EditDraft>,
    /// A create or update is in flight; the triggering control stays disabled.
    pub submitting: bool,
}

impl TodoListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: i64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    pub fn remaining_count(&self) -> usize {
        self.todos.len() - self.completed_count()
    }

    pub fn reduce(&mut self, action: TodoAction) {
        match action {
            TodoAction::Loaded(todos) => {
                self.todos = todos;
                // Edited row may have vanished.
                if let Some(draft) = &self.editing {
                    if self.get(draft.id).is_none() {
                        self.editing = None;
                    }
                }
            }
            TodoAction::FormChanged(form) => self.form = form,
            TodoAction::SubmitStarted => self.submitting = true,
            TodoAction::SubmitFinished => self.submitting = false,
            TodoAction::Created(todo) => {
                self.todos.push(todo);
                self.form = CreateForm::default();
            }
            TodoAction::BeginEdit(id) => {
                if self.get(id).is_some() {
                    self.editing = Some(EditDraft {
                        id,
                        patch: TodoPatch::default(),
                    });
                }
            }
            TodoAction::DraftChanged(patch) => {
                if let Some(draft) = &mut self.editing {
                    draft.patch = patch;
                }
            }
            TodoAction::CancelEdit => self.editing = None,
            TodoAction::Updated(todo) => {
                if self.editing.as_ref().is_some_and(|d| d.id == todo.id) {
                    self.editing = None;
                }
                self.replace(todo);
            }
            TodoAction::Toggled(todo) => self.replace(todo),
            TodoAction::ToggleOptimistic { id, completed } => self.set_completed(id, completed),
            TodoAction::ToggleRolledBack { id, previous } => self.set_completed(id, previous),
            TodoAction::Removed(id) => {
                self.todos.retain(|t| t.id != id);
                if self.editing.as_ref().is_some_and(|d| d.id == id) {
                    self.editing = None;
                }
            }
        }
    }

    fn replace(&mut self, todo: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            *slot = todo;
        }
    }

    fn set_completed(&mut self, id: i64, completed: bool) {
        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
            todo.completed = completed;
        }
    }
}
