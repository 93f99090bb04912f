/*
[INPUT]:  Error sources (HTTP transport, unexpected status codes, serialization, URLs)
[OUTPUT]: Structured per-operation error types carrying the server's response text
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new operations or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the task API client
#[derive(Error, Debug)]
pub enum TaskApiError {
    /// Listing or searching tasks failed (transport or non-success status)
    #[error("Failed to fetch tasks: {message}")]
    Fetch { status: Option<u16>, message: String },

    /// Server did not answer a create with 201 Created
    #[error("Failed to create task: {status} - {body}")]
    Create { status: u16, body: String },

    /// Server rejected an update
    #[error("Failed to update task: {status} - {body}")]
    Update { status: u16, body: String },

    /// Server did not answer a delete with 204 No Content
    #[error("Failed to delete task: {status} - {body}")]
    Delete { status: u16, body: String },

    /// Server rejected a run request
    #[error("Command execution failed: {status} - {body}")]
    Run { status: u16, body: String },

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Task has not been assigned an id by the server yet
    #[error("Task has no server-assigned id")]
    MissingId,
}

impl TaskApiError {
    /// HTTP status code reported by the server, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            TaskApiError::Fetch { status, .. } => *status,
            TaskApiError::Create { status, .. }
            | TaskApiError::Update { status, .. }
            | TaskApiError::Delete { status, .. }
            | TaskApiError::Run { status, .. } => Some(*status),
            TaskApiError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Check if the server answered 404 Not Found
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    /// Wrap a transport failure of a list/search call
    pub(crate) fn fetch_transport(err: reqwest::Error) -> Self {
        TaskApiError::Fetch {
            status: err.status().map(|status| status.as_u16()),
            message: err.to_string(),
        }
    }

    /// Wrap a non-success status of a list/search call
    pub(crate) fn fetch_status(status: StatusCode) -> Self {
        TaskApiError::Fetch {
            status: Some(status.as_u16()),
            message: format!("unexpected status {status}"),
        }
    }
}

/// Result type alias for task API operations
pub type Result<T> = std::result::Result<T, TaskApiError>;
