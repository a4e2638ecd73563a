//! Error types for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Everything a handler can fail with. Each variant maps to one status code
/// and is rendered as `{"error": "<message>"}`. Server-side failures only
/// expose a short message; the full cause chain goes to the log.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The measurement table is empty, so there is no window to compute
    #[error("no measurements available")]
    NoData,

    /// No route matches the request path
    #[error("no route for {0}")]
    RouteNotFound(String),

    /// Opening a connection or running a query failed
    #[error("storage unavailable: {0:#}")]
    Storage(#[from] anyhow::Error),

    /// The blocking query task panicked or was cancelled
    #[error("query task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoData | ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Storage(_) => "storage unavailable".to_string(),
            ApiError::Task(_) => "query task failed".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("[surfsup] api: {} {}", status, self);
        } else {
            log::debug!("[surfsup] api: {} {}", status, self);
        }
        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}

/// Type alias for handler results
pub type Result<T> = std::result::Result<T, ApiError>;
