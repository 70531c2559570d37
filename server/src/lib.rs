//! In-memory todo API server.
//!
//! # Overview
//! One endpoint, `/graphql`, multiplexes the read operation (`Todos`) and the
//! four mutations (`AddTodo`, `UpdateTodo`, `ToggleTodo`, `DeleteTodo`) by
//! `operationName`. State lives only for the process lifetime.
//!
//! # Design
//! - `TodoStore` sits behind a `tokio::sync::RwLock` in router state. Each
//!   mutation holds the write lock until it has finished, so mutations never
//!   interleave.
//! - Not-found is data (`null` / `false`), not an error.
//! - DTOs are defined independently from the client core crate; the core's
//!   integration tests catch schema drift.

pub mod config;
pub mod error;
pub mod schema;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

pub use config::ServerConfig;
pub use error::{RequestError, ServerError};
pub use schema::{GraphQlRequest, GraphQlResponse, Operation};
pub use store::{IdStrategy, Todo, TodoStore};

pub type SharedStore = Arc<RwLock<TodoStore>>;

pub fn app() -> Router {
    app_with_store(TodoStore::new())
}

pub fn app_with_store(store: TodoStore) -> Router {
    let store: SharedStore = Arc::new(RwLock::new(store));
    Router::new()
        .route("/graphql", get(graphql_get).post(graphql_post))
        .with_state(store)
}

pub async fn run(listener: TcpListener, store: TodoStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_store(store)).await
}

async fn graphql_post(
    State(store): State<SharedStore>,
    body: Result<Json<GraphQlRequest>, JsonRejection>,
) -> Result<Json<GraphQlResponse>, RequestError> {
    let Json(request) = body.map_err(|rejection| RequestError::Malformed(rejection.body_text()))?;
    let operation = Operation::parse(request)?;
    execute(&store, operation).await.map(Json)
}

async fn graphql_get(
    State(store): State<SharedStore>,
    params: Result<Query<schema::GraphQlQueryParams>, QueryRejection>,
) -> Result<Json<GraphQlResponse>, RequestError> {
    let Query(params) = params.map_err(|rejection| RequestError::Malformed(rejection.body_text()))?;
    let operation = Operation::parse_get(params)?;
    execute(&store, operation).await.map(Json)
}

async fn execute(store: &SharedStore, operation: Operation) -> Result<GraphQlResponse, RequestError> {
    debug!(operation = operation.name(), "executing");
    match operation {
        Operation::Todos => {
            let store = store.read().await;
            GraphQlResponse::field("todos", store.todos())
        }
        Operation::AddTodo(vars) => {
            let todo = store.write().await.add_todo(vars.text);
            GraphQlResponse::field("addTodo", todo)
        }
        Operation::UpdateTodo(vars) => {
            let todo = store.write().await.update_todo(&vars.id, vars.text);
            GraphQlResponse::field("updateTodo", todo)
        }
        Operation::ToggleTodo(vars) => {
            let todo = store.write().await.toggle_todo(&vars.id);
            GraphQlResponse::field("toggleTodo", todo)
        }
        Operation::DeleteTodo(vars) => {
            let deleted = store.write().await.delete_todo(&vars.id);
            GraphQlResponse::field("deleteTodo", deleted)
        }
    }
}
