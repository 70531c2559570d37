//! Domain DTOs and GraphQL envelopes for the todo API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently.
//! Integration tests catch any drift between the two crates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// The subset of a todo the toggle mutation selects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggledTodo {
    pub id: String,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub operation_name: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextVariables<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct IdVariables<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateVariables<'a> {
    pub id: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}
