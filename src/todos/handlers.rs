use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::TodoError,
    state::AppState,
    todos::{
        dto::{
            CreateTodoRequest, DeleteTodoRequest, DeleteTodoResponse, ToggleTodoRequest,
            UpdateTodoRequest,
        },
        repo_types::Todo,
    },
};

// --- public routers ---

pub fn query_routes() -> Router<AppState> {
    Router::new().route("/rpc/getTodos", get(get_todos))
}

pub fn mutation_routes() -> Router<AppState> {
    Router::new()
        .route("/rpc/createTodo", post(create_todo))
        .route("/rpc/updateTodo", post(update_todo))
        .route("/rpc/toggleTodo", post(toggle_todo))
        .route("/rpc/deleteTodo", post(delete_todo))
}

// --- procedures ---

#[instrument(skip(state))]
pub async fn get_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, TodoError> {
    Ok(Json(state.todos.list().await?))
}

#[instrument(skip(state, body))]
pub async fn create_todo(
    State(state): State<AppState>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<Json<Todo>, TodoError> {
    let todo = state
        .todos
        .create(&body.title, body.description.as_deref())
        .await?;
    Ok(Json(todo))
}

#[instrument(skip(state, body))]
pub async fn update_todo(
    State(state): State<AppState>,
    Json(body): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>, TodoError> {
    let (id, patch) = body.into_parts();
    Ok(Json(state.todos.update(id, patch).await?))
}

#[instrument(skip(state))]
pub async fn toggle_todo(
    State(state): State<AppState>,
    Json(body): Json<ToggleTodoRequest>,
) -> Result<Json<Todo>, TodoError> {
    Ok(Json(state.todos.toggle(body.id, body.completed).await?))
}

#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    Json(body): Json<DeleteTodoRequest>,
) -> Result<Json<DeleteTodoResponse>, TodoError> {
    let success = state.todos.delete(body.id).await?;
    Ok(Json(DeleteTodoResponse { success }))
}
