pub mod dto;
pub mod handlers;
pub mod memory;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use memory::MemoryTodoStore;
pub use repo::{PgTodoStore, TodoStore};
pub use repo_types::{Todo, TodoPatch};
pub use services::TodoService;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::query_routes())
        .merge(handlers::mutation_routes())
}
