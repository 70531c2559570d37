//! View model for the todo UI.
//!
//! # Design
//! `TodoApp` turns user intent into one request plus one cache patch. Each
//! action returns a `Dispatch`: the request for the host to execute and a
//! `Ticket` the host hands back to `complete` together with the outcome.
//! Requests may complete in any order; nothing is retried.
//!
//! A failed round-trip of any kind replaces the whole view with
//! `ViewState::Failed`. A failed inline edit also drops its optimistic layer.
//! A successful answer saying the server no longer holds the id (`null`
//! toggle or update, `false` delete) removes the row locally.

use tracing::warn;

use crate::cache::{MutationId, TodoCache};
use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::Todo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Failed(String),
    Ready,
}

/// What a completed request was for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ticket {
    Load,
    Add,
    Toggle { id: String },
    Edit { mutation: MutationId },
    Delete { id: String },
}

#[derive(Debug, Clone)]
pub struct Dispatch {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

#[derive(Debug)]
pub struct TodoApp {
    client: TodoClient,
    cache: TodoCache,
    state: ViewState,
    new_todo_text: String,
}

impl TodoApp {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            cache: TodoCache::new(),
            state: ViewState::Loading,
            new_todo_text: String::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn cache(&self) -> &TodoCache {
        &self.cache
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.cache.todos()
    }

    pub fn new_todo_text(&self) -> &str {
        &self.new_todo_text
    }

    pub fn set_new_todo_text(&mut self, text: impl Into<String>) {
        self.new_todo_text = text.into();
    }

    /// Fetch the full list. The view shows `Loading` until it completes.
    pub fn load(&mut self) -> Dispatch {
        self.state = ViewState::Loading;
        Dispatch {
            ticket: Ticket::Load,
            request: self.client.build_todos(),
        }
    }

    /// Send the add-input text, unless it is blank. The input is cleared as
    /// soon as the request is issued.
    pub fn submit_new_todo(&mut self) -> Option<Dispatch> {
        if self.new_todo_text.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.new_todo_text);
        let request = self.client.build_add_todo(&text);
        self.dispatch(Ticket::Add, request)
    }

    pub fn toggle(&mut self, id: &str) -> Option<Dispatch> {
        let request = self.client.build_toggle_todo(id);
        self.dispatch(Ticket::Toggle { id: id.to_string() }, request)
    }

    /// Inline edit: shows `text` immediately and sends it to the server.
    pub fn edit(&mut self, id: &str, text: &str) -> Option<Dispatch> {
        let request = match self.client.build_update_todo(id, text) {
            Ok(request) => request,
            Err(err) => {
                self.fail(err);
                return None;
            }
        };
        let mutation = self.cache.begin_optimistic(id, text.to_string());
        Some(Dispatch {
            ticket: Ticket::Edit { mutation },
            request,
        })
    }

    pub fn delete(&mut self, id: &str) -> Option<Dispatch> {
        let request = self.client.build_delete_todo(id);
        self.dispatch(Ticket::Delete { id: id.to_string() }, request)
    }

    /// Reconcile the cache with the outcome of a dispatched request.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<HttpResponse, ApiError>) {
        let result = outcome.and_then(|response| self.reconcile(&ticket, response));
        if let Err(err) = result {
            if let Ticket::Edit { mutation } = ticket {
                self.cache.revert_optimistic(mutation);
            }
            self.fail(err);
        }
    }

    fn reconcile(&mut self, ticket: &Ticket, response: HttpResponse) -> Result<(), ApiError> {
        match ticket {
            Ticket::Load => {
                let todos = self.client.parse_todos(response)?;
                self.cache.write_todos(todos);
                self.state = ViewState::Ready;
            }
            Ticket::Add => {
                let todo = self.client.parse_add_todo(response)?;
                self.cache.append(todo);
            }
            Ticket::Toggle { id } => match self.client.parse_toggle_todo(response)? {
                Some(toggled) => {
                    self.cache.write_completed(&toggled.id, toggled.completed);
                }
                None => {
                    self.cache.evict(id);
                }
            },
            Ticket::Edit { mutation } => {
                let confirmed = self.client.parse_update_todo(response)?;
                self.cache.commit_optimistic(*mutation, confirmed);
            }
            Ticket::Delete { id } => {
                // `false` means the server had nothing to delete; the row
                // goes either way.
                self.client.parse_delete_todo(response)?;
                self.cache.evict(id);
            }
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        ticket: Ticket,
        request: Result<HttpRequest, ApiError>,
    ) -> Option<Dispatch> {
        match request {
            Ok(request) => Some(Dispatch { ticket, request }),
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    fn fail(&mut self, err: ApiError) {
        warn!(error = %err, "request failed");
        self.state = ViewState::Failed(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_app(body: &str) -> TodoApp {
        let mut app = TodoApp::new(TodoClient::new("http://localhost:4000"));
        let dispatch = app.load();
        app.complete(dispatch.ticket, Ok(HttpResponse::new(200, body)));
        app
    }

    fn two_todos() -> TodoApp {
        ready_app(
            r#"{"data":{"todos":[
                {"id":"1","text":"A","completed":false},
                {"id":"2","text":"B","completed":false}
            ]}}"#,
        )
    }

    fn ok(body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse::new(200, body))
    }

    #[test]
    fn starts_loading_then_ready() {
        let mut app = TodoApp::new(TodoClient::new("http://localhost:4000"));
        assert_eq!(app.state(), &ViewState::Loading);
        let dispatch = app.load();
        assert_eq!(dispatch.ticket, Ticket::Load);
        app.complete(dispatch.ticket, ok(r#"{"data":{"todos":[]}}"#));
        assert_eq!(app.state(), &ViewState::Ready);
        assert!(app.todos().is_empty());
    }

    #[test]
    fn load_failure_shows_error() {
        let mut app = TodoApp::new(TodoClient::new("http://localhost:4000"));
        let dispatch = app.load();
        app.complete(
            dispatch.ticket,
            Err(ApiError::Transport("connection refused".to_string())),
        );
        assert_eq!(
            app.state(),
            &ViewState::Failed("network error: connection refused".to_string())
        );
    }

    #[test]
    fn blank_input_issues_no_request() {
        let mut app = two_todos();
        app.set_new_todo_text("   ");
        assert!(app.submit_new_todo().is_none());
        assert_eq!(app.new_todo_text(), "   ");
    }

    #[test]
    fn add_clears_input_and_appends_on_success() {
        let mut app = two_todos();
        app.set_new_todo_text("Buy milk");
        let dispatch = app.submit_new_todo().unwrap();
        assert_eq!(app.new_todo_text(), "");
        let body: serde_json::Value =
            serde_json::from_str(dispatch.request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["variables"]["text"], "Buy milk");

        app.complete(
            dispatch.ticket,
            ok(r#"{"data":{"addTodo":{"id":"3","text":"Buy milk","completed":false}}}"#),
        );
        let todos = app.todos();
        assert_eq!(todos.len(), 3);
        assert_eq!(todos[2].text, "Buy milk");
        assert!(!todos[2].completed);
    }

    #[test]
    fn toggle_patches_only_matching_record() {
        let mut app = two_todos();
        let dispatch = app.toggle("2").unwrap();
        app.complete(
            dispatch.ticket,
            ok(r#"{"data":{"toggleTodo":{"id":"2","completed":true}}}"#),
        );
        let todos = app.todos();
        assert!(!todos[0].completed);
        assert!(todos[1].completed);
        assert_eq!(todos[1].text, "B");
    }

    #[test]
    fn toggle_of_vanished_record_evicts_it() {
        let mut app = two_todos();
        let dispatch = app.toggle("1").unwrap();
        assert_eq!(dispatch.ticket, Ticket::Toggle { id: "1".to_string() });
        app.complete(dispatch.ticket, ok(r#"{"data":{"toggleTodo":null}}"#));
        let ids: Vec<_> = app.todos().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["2"]);
        assert_eq!(app.state(), &ViewState::Ready);
    }

    #[test]
    fn edit_is_visible_before_response() {
        let mut app = two_todos();
        let dispatch = app.edit("1", "A edited").unwrap();
        assert_eq!(app.todos()[0].text, "A edited");

        app.complete(
            dispatch.ticket,
            ok(r#"{"data":{"updateTodo":{"id":"1","text":"A edited","completed":false}}}"#),
        );
        assert_eq!(app.todos()[0].text, "A edited");
        assert_eq!(app.cache().pending(), 0);
    }

    #[test]
    fn failed_edit_reverts_and_shows_error() {
        let mut app = two_todos();
        let dispatch = app.edit("1", "A edited").unwrap();
        app.complete(
            dispatch.ticket,
            Ok(HttpResponse::new(500, "upstream exploded")),
        );
        assert_eq!(app.cache().pending(), 0);
        assert_eq!(app.todos()[0].text, "A");
        assert_eq!(
            app.state(),
            &ViewState::Failed("HTTP 500: upstream exploded".to_string())
        );
    }

    #[test]
    fn delete_evicts_on_true() {
        let mut app = two_todos();
        let dispatch = app.delete("1").unwrap();
        app.complete(dispatch.ticket, ok(r#"{"data":{"deleteTodo":true}}"#));
        let ids: Vec<_> = app.todos().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["2"]);
    }

    #[test]
    fn delete_false_still_removes_row() {
        let mut app = two_todos();
        let dispatch = app.delete("1").unwrap();
        app.complete(dispatch.ticket, ok(r#"{"data":{"deleteTodo":false}}"#));
        let ids: Vec<_> = app.todos().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["2"]);
        assert_eq!(app.state(), &ViewState::Ready);
    }

    #[test]
    fn failed_delete_keeps_row() {
        let mut app = two_todos();
        let dispatch = app.delete("1").unwrap();
        app.complete(dispatch.ticket, Ok(HttpResponse::new(500, "boom")));
        assert_eq!(app.todos().len(), 2);
    }

    #[test]
    fn graphql_error_replaces_view() {
        let mut app = two_todos();
        let dispatch = app.toggle("1").unwrap();
        app.complete(
            dispatch.ticket,
            Ok(HttpResponse::new(
                400,
                r#"{"errors":[{"message":"unknown operation"}]}"#,
            )),
        );
        assert_eq!(
            app.state(),
            &ViewState::Failed("unknown operation".to_string())
        );
    }
}
