//! Client core for the todo UI.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), keeps a normalized cache of
//! todos in step with mutation results, and renders the view as HTML.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only the endpoint URL.
//! - `TodoCache` patches its copy after each mutation instead of refetching.
//!   Inline edits go through optimistic layers that commit or revert.
//! - `TodoApp` is the view model: every action yields a `Dispatch` for the
//!   host to execute, and `complete` folds the outcome back in.
//! - DTOs are defined independently from the server crate; integration tests
//!   catch schema drift.

pub mod app;
pub mod cache;
pub mod client;
pub mod error;
pub mod http;
pub mod render;
pub mod types;

pub use app::{Dispatch, Ticket, TodoApp, ViewState};
pub use cache::{MutationId, TodoCache};
pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use render::render;
pub use types::{Todo, ToggledTodo};
