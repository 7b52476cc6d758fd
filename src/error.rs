use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("todo {id} not found")]
    NotFound { id: i64 },

    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl TodoError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TodoError::NotFound { .. } => "NOT_FOUND",
            TodoError::Validation { .. } => "VALIDATION_ERROR",
            TodoError::Database(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            TodoError::NotFound { .. } => StatusCode::NOT_FOUND,
            TodoError::Validation { .. } => StatusCode::BAD_REQUEST,
            TodoError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body: `{"error": {"code", "message", "field"?}}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let field = match &self {
            TodoError::Validation { field, .. } => Some(*field),
            _ => None,
        };
        // Database details stay in the log.
        let message = match &self {
            TodoError::Database(_) => "internal error".to_string(),
            other => other.to_string(),
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message,
                field,
            },
        };
        (status, Json(body)).into_response()
    }
}
