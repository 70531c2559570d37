//! Stateless request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only the endpoint URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the round-trip in between.
//!
//! Every mutation is a POST to `/graphql` naming the operation and carrying
//! the GraphQL document it selects, so the requests are also valid against a
//! full GraphQL server. The read goes over GET.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    GraphQlRequest, GraphQlResponse, IdVariables, TextVariables, Todo, ToggledTodo,
    UpdateVariables,
};

const ADD_TODO: &str =
    "mutation AddTodo($text: String!) { addTodo(text: $text) { id text completed } }";
const UPDATE_TODO: &str = "mutation UpdateTodo($id: ID!, $text: String!) \
     { updateTodo(id: $id, text: $text) { id text completed } }";
const TOGGLE_TODO: &str = "mutation ToggleTodo($id: ID!) { toggleTodo(id: $id) { id completed } }";
const DELETE_TODO: &str = "mutation DeleteTodo($id: ID!) { deleteTodo(id: $id) }";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    endpoint: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/graphql", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}?operationName=Todos", self.endpoint),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_add_todo(&self, text: &str) -> Result<HttpRequest, ApiError> {
        self.mutation(ADD_TODO, "AddTodo", TextVariables { text })
    }

    pub fn build_update_todo(&self, id: &str, text: &str) -> Result<HttpRequest, ApiError> {
        self.mutation(UPDATE_TODO, "UpdateTodo", UpdateVariables { id, text })
    }

    pub fn build_toggle_todo(&self, id: &str) -> Result<HttpRequest, ApiError> {
        self.mutation(TOGGLE_TODO, "ToggleTodo", IdVariables { id })
    }

    pub fn build_delete_todo(&self, id: &str) -> Result<HttpRequest, ApiError> {
        self.mutation(DELETE_TODO, "DeleteTodo", IdVariables { id })
    }

    pub fn parse_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_field(response, "todos")
    }

    pub fn parse_add_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_field(response, "addTodo")
    }

    /// `None` when the server no longer holds the id.
    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Option<Todo>, ApiError> {
        parse_field(response, "updateTodo")
    }

    /// `None` when the server no longer holds the id.
    pub fn parse_toggle_todo(
        &self,
        response: HttpResponse,
    ) -> Result<Option<ToggledTodo>, ApiError> {
        parse_field(response, "toggleTodo")
    }

    /// `false` when there was nothing to delete.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<bool, ApiError> {
        parse_field(response, "deleteTodo")
    }

    fn mutation<V: Serialize>(
        &self,
        query: &str,
        operation_name: &str,
        variables: V,
    ) -> Result<HttpRequest, ApiError> {
        let envelope = GraphQlRequest {
            query,
            operation_name,
            variables,
        };
        let body = serde_json::to_string(&envelope)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.endpoint.clone(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Decode the envelope and pull `data[field]` out as `T`.
///
/// GraphQL errors win over the status code, since the server reports
/// validation failures as a 4xx with an `errors` body.
fn parse_field<T: DeserializeOwned>(
    response: HttpResponse,
    field: &'static str,
) -> Result<T, ApiError> {
    let envelope = match serde_json::from_str::<GraphQlResponse>(&response.body) {
        Ok(envelope) => envelope,
        Err(_) if response.status != 200 => {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            })
        }
        Err(e) => return Err(ApiError::DeserializationError(e.to_string())),
    };
    if !envelope.errors.is_empty() {
        return Err(ApiError::GraphQl(
            envelope.errors.into_iter().map(|e| e.message).collect(),
        ));
    }
    if response.status != 200 {
        return Err(ApiError::HttpError {
            status: response.status,
            body: response.body,
        });
    }
    let value = envelope
        .data
        .and_then(|mut data| data.remove(field))
        .ok_or(ApiError::MissingData(field))?;
    serde_json::from_value(value).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
