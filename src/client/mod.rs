pub mod api;
pub mod controller;
pub mod error;
pub mod state;

pub use api::{HttpTodoApi, TodoApi};
pub use controller::TodoController;
pub use error::ClientError;
pub use state::{CreateForm, EditDraft, TodoAction, TodoListState};
