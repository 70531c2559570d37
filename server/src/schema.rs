//! GraphQL-shaped request and response envelopes.
//!
//! Requests name one of the five operations in `operationName` and carry its
//! arguments in `variables`. A `query` document, if sent, is ignored: the
//! operation name alone selects the resolver. Responses use the usual
//! `{"data": ...}` / `{"errors": [...]}` shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RequestError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub operation_name: String,
    #[serde(default)]
    pub variables: Value,
}

/// Query string accepted on `GET /graphql`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlQueryParams {
    pub operation_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddTodoVariables {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoVariables {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct IdVariables {
    pub id: String,
}

#[derive(Debug)]
pub enum Operation {
    Todos,
    AddTodo(AddTodoVariables),
    UpdateTodo(UpdateTodoVariables),
    ToggleTodo(IdVariables),
    DeleteTodo(IdVariables),
}

impl Operation {
    const MUTATIONS: [&'static str; 4] = ["AddTodo", "UpdateTodo", "ToggleTodo", "DeleteTodo"];

    pub fn parse(request: GraphQlRequest) -> Result<Self, RequestError> {
        let GraphQlRequest {
            operation_name,
            variables,
        } = request;
        let operation = match operation_name.as_str() {
            "Todos" => Operation::Todos,
            "AddTodo" => Operation::AddTodo(variables_for("AddTodo", variables)?),
            "UpdateTodo" => Operation::UpdateTodo(variables_for("UpdateTodo", variables)?),
            "ToggleTodo" => Operation::ToggleTodo(variables_for("ToggleTodo", variables)?),
            "DeleteTodo" => Operation::DeleteTodo(variables_for("DeleteTodo", variables)?),
            _ => return Err(RequestError::UnknownOperation(operation_name)),
        };
        Ok(operation)
    }

    /// Resolve an operation sent over GET. Only queries are allowed there.
    pub fn parse_get(params: GraphQlQueryParams) -> Result<Self, RequestError> {
        if Self::MUTATIONS.contains(&params.operation_name.as_str()) {
            return Err(RequestError::MutationOverGet(params.operation_name));
        }
        Self::parse(GraphQlRequest {
            operation_name: params.operation_name,
            variables: Value::Null,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Todos => "Todos",
            Operation::AddTodo(_) => "AddTodo",
            Operation::UpdateTodo(_) => "UpdateTodo",
            Operation::ToggleTodo(_) => "ToggleTodo",
            Operation::DeleteTodo(_) => "DeleteTodo",
        }
    }
}

fn variables_for<T: serde::de::DeserializeOwned>(
    operation: &'static str,
    variables: Value,
) -> Result<T, RequestError> {
    serde_json::from_value(variables)
        .map_err(|source| RequestError::InvalidVariables { operation, source })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    /// `{"data": {field: value}}`
    pub fn field<T: Serialize>(field: &str, value: T) -> Result<Self, RequestError> {
        let value = serde_json::to_value(value).map_err(RequestError::Serialization)?;
        let mut data = Map::new();
        data.insert(field.to_string(), value);
        Ok(Self {
            data: Some(Value::Object(data)),
            errors: Vec::new(),
        })
    }

    pub fn error(message: String) -> Self {
        Self {
            data: None,
            errors: vec![GraphQlError { message }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> GraphQlRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn todos_needs_no_variables() {
        let op = Operation::parse(request(json!({"operationName": "Todos"}))).unwrap();
        assert!(matches!(op, Operation::Todos));
    }

    #[test]
    fn query_document_is_ignored() {
        let op = Operation::parse(request(json!({
            "query": "query Todos { todos { id text completed } }",
            "operationName": "Todos",
            "variables": {}
        })))
        .unwrap();
        assert!(matches!(op, Operation::Todos));
    }

    #[test]
    fn add_todo_reads_text() {
        let op = Operation::parse(request(json!({
            "operationName": "AddTodo",
            "variables": {"text": "Buy milk"}
        })))
        .unwrap();
        match op {
            Operation::AddTodo(vars) => assert_eq!(vars.text, "Buy milk"),
            other => panic!("unexpected operation: {other:?}"),
        }
    }

    #[test]
    fn update_todo_reads_id_and_text() {
        let op = Operation::parse(request(json!({
            "operationName": "UpdateTodo",
            "variables": {"id": "3", "text": "New"}
        })))
        .unwrap();
        match op {
            Operation::UpdateTodo(vars) => {
                assert_eq!(vars.id, "3");
                assert_eq!(vars.text, "New");
            }
            other => panic!("unexpected operation: {other:?}"),
        }
    }

    #[test]
    fn non_string_text_is_rejected() {
        let err = Operation::parse(request(json!({
            "operationName": "AddTodo",
            "variables": {"text": 5}
        })))
        .unwrap_err();
        assert!(matches!(
            err,
            RequestError::InvalidVariables { operation: "AddTodo", .. }
        ));
    }

    #[test]
    fn missing_variables_are_rejected() {
        let err = Operation::parse(request(json!({"operationName": "DeleteTodo"}))).unwrap_err();
        assert!(matches!(err, RequestError::InvalidVariables { .. }));
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let err = Operation::parse(request(json!({"operationName": "DropTable"}))).unwrap_err();
        assert!(matches!(err, RequestError::UnknownOperation(name) if name == "DropTable"));
    }

    #[test]
    fn mutation_over_get_is_rejected() {
        let err = Operation::parse_get(GraphQlQueryParams {
            operation_name: "AddTodo".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, RequestError::MutationOverGet(_)));
    }

    #[test]
    fn field_response_wraps_value_under_data() {
        let response = GraphQlResponse::field("deleteTodo", true).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, json!({"data": {"deleteTodo": true}}));
    }

    #[test]
    fn error_response_omits_data() {
        let json = serde_json::to_value(GraphQlResponse::error("boom".to_string())).unwrap();
        assert_eq!(json, json!({"errors": [{"message": "boom"}]}));
    }
}
