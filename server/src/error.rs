//! Error types for the todo server.
//!
//! # Design
//! `ServerError` covers startup: configuration and socket I/O. Problems with
//! an individual request are `RequestError`s; they never abort the server and
//! are rendered as GraphQL error bodies so clients see one uniform envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::warn;

use crate::schema::GraphQlResponse;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid port: {0:?}")]
    InvalidPort(String),

    #[error("unknown id strategy: {0:?} (expected \"monotonic\" or \"length-plus-one\")")]
    InvalidIdStrategy(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A request that could not be executed.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The body or query string could not be decoded at all.
    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("unknown operation: {0:?}")]
    UnknownOperation(String),

    /// Variables missing, or of the wrong type, for a known operation.
    #[error("invalid variables for {operation}: {source}")]
    InvalidVariables {
        operation: &'static str,
        source: serde_json::Error,
    },

    #[error("mutation {0} must be sent with POST")]
    MutationOverGet(String),

    #[error("failed to serialize result: {0}")]
    Serialization(serde_json::Error),
}

impl RequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::MutationOverGet(_) => StatusCode::METHOD_NOT_ALLOWED,
            RequestError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        warn!(error = %self, "rejected request");
        let status = self.status();
        (status, Json(GraphQlResponse::error(self.to_string()))).into_response()
    }
}
