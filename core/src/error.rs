//! Error types for the todo API client.
//!
//! # Design
//! A missing todo is not an error: the API answers `null` / `false` and the
//! parse methods pass that through as `None` / `false`. Everything here is a
//! failure of the round-trip itself. The `Display` text is what the view shows
//! after `Error: `.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The host could not complete the HTTP exchange.
    #[error("network error: {0}")]
    Transport(String),

    /// Non-2xx status without a GraphQL error body.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The server answered with a GraphQL `errors` list.
    #[error("{}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response had no `data` entry for the requested field.
    #[error("response is missing data for {0}")]
    MissingData(&'static str),

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
