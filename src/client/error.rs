use thiserror::Error;

use crate::error::TodoError;

/// Errors surfaced by a [`TodoApi`](super::api::TodoApi) call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The call never completed (connect, timeout, undecodable response).
    #[error("connectivity error: {0}")]
    Connectivity(#[from] reqwest::Error),

    /// The server answered with an error body.
    #[error("api error {code} (status {status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Rejected locally, nothing was sent.
    #[error("invalid input: {0}")]
    Validation(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { code, .. } if code == "NOT_FOUND")
    }

    pub fn is_validation(&self) -> bool {
        match self {
            ClientError::Validation(_) => true,
            ClientError::Api { code, .. } => code == "VALIDATION_ERROR",
            ClientError::Connectivity(_) => false,
        }
    }
}

// In-process transport: service errors look exactly like their HTTP rendering.
impl From<TodoError> for ClientError {
    fn from(err: TodoError) -> Self {
        ClientError::Api {
            status: err.status().as_u16(),
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}
