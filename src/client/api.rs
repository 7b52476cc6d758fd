use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::client::error::ClientError;
use crate::todos::dto::{
    CreateTodoRequest, DeleteTodoRequest, DeleteTodoResponse, ToggleTodoRequest, UpdateTodoRequest,
};
use crate::todos::{Todo, TodoService};

/// The procedure surface as seen by a caller.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn get_todos(&self) -> Result<Vec<Todo>, ClientError>;
    async fn create_todo(&self, req: CreateTodoRequest) -> Result<Todo, ClientError>;
    async fn update_todo(&self, req: UpdateTodoRequest) -> Result<Todo, ClientError>;
    async fn toggle_todo(&self, req: ToggleTodoRequest) -> Result<Todo, ClientError>;
    async fn delete_todo(&self, req: DeleteTodoRequest) -> Result<DeleteTodoResponse, ClientError>;
}

/// HTTP client for the `/api/v1/rpc` procedures.
#[derive(Clone)]
pub struct HttpTodoApi {
    pub base_url: String,
    client: ReqwestClient,
}

impl HttpTodoApi {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, ReqwestClient::new())
    }

    pub fn with_client(base_url: &str, client: ReqwestClient) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn procedure_url(&self, procedure: &str) -> String {
        format!("{}/api/v1/rpc/{}", self.base_url, procedure)
    }

    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let response = req.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        // Error bodies are best effort; a proxy may answer with plain text.
        let body: Value = response.json().await.unwrap_or(Value::Null);
        let error = &body["error"];
        let code = error["code"].as_str().unwrap_or("UNKNOWN").to_string();
        let message = error["message"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string());
        debug!(status = status.as_u16(), %code, "procedure failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn get_todos(&self) -> Result<Vec<Todo>, ClientError> {
        let req = self.client.get(self.procedure_url("getTodos"));
        self.execute(req).await
    }

    async fn create_todo(&self, req: CreateTodoRequest) -> Result<Todo, ClientError> {
        let req = self.client.post(self.procedure_url("createTodo")).json(&req);
        self.execute(req).await
    }

    async fn update_todo(&self, req: UpdateTodoRequest) -> Result<Todo, ClientError> {
        let req = self.client.post(self.procedure_url("updateTodo")).json(&req);
        self.execute(req).await
    }

    async fn toggle_todo(&self, req: ToggleTodoRequest) -> Result<Todo, ClientError> {
        let req = self.client.post(self.procedure_url("toggleTodo")).json(&req);
        self.execute(req).await
    }

    async fn delete_todo(&self, req: DeleteTodoRequest) -> Result<DeleteTodoResponse, ClientError> {
        let req = self.client.post(self.procedure_url("deleteTodo")).json(&req);
        self.execute(req).await
    }
}

/// In-process transport straight onto the service.
#[async_trait]
impl TodoApi for TodoService {
    async fn get_todos(&self) -> Result<Vec<Todo>, ClientError> {
        Ok(self.list().await?)
    }

    async fn create_todo(&self, req: CreateTodoRequest) -> Result<Todo, ClientError> {
        Ok(self.create(&req.title, req.description.as_deref()).await?)
    }

    async fn update_todo(&self, req: UpdateTodoRequest) -> Result<Todo, ClientError> {
        let (id, patch) = req.into_parts();
        Ok(self.update(id, patch).await?)
    }

    async fn toggle_todo(&self, req: ToggleTodoRequest) -> Result<Todo, ClientError> {
        Ok(self.toggle(req.id, req.completed).await?)
    }

    async fn delete_todo(&self, req: DeleteTodoRequest) -> Result<DeleteTodoResponse, ClientError> {
        let success = self.delete(req.id).await?;
        Ok(DeleteTodoResponse { success })
    }
}
