//! In-memory todo store.
//!
//! # Design
//! `TodoStore` exclusively owns the ordered collection and the id counter.
//! Handlers reach it through shared router state; nothing here is global.
//! Not-found is reported as `None` / `false`, never as an error.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ServerError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// How `add_todo` picks the id of a new record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// Counter independent of the collection size. Ids are never reused.
    #[default]
    Monotonic,
    /// `len + 1` at insertion time. Can hand out an id that is still live
    /// once an earlier record has been deleted.
    LengthPlusOne,
}

impl FromStr for IdStrategy {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monotonic" => Ok(IdStrategy::Monotonic),
            "length-plus-one" => Ok(IdStrategy::LengthPlusOne),
            other => Err(ServerError::InvalidIdStrategy(other.to_string())),
        }
    }
}

#[derive(Debug, Default)]
pub struct TodoStore {
    todos: Vec<Todo>,
    last_id: u64,
    strategy: IdStrategy,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// All todos in insertion order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn add_todo(&mut self, text: String) -> Todo {
        let id = self.next_id();
        let todo = Todo {
            id,
            text,
            completed: false,
        };
        self.todos.push(todo.clone());
        info!(id = %todo.id, "todo added");
        todo
    }

    pub fn toggle_todo(&mut self, id: &str) -> Option<Todo> {
        let todo = self.find_mut(id)?;
        todo.completed = !todo.completed;
        info!(id, completed = todo.completed, "todo toggled");
        Some(todo.clone())
    }

    pub fn update_todo(&mut self, id: &str, text: String) -> Option<Todo> {
        let todo = self.find_mut(id)?;
        todo.text = text;
        info!(id, "todo updated");
        Some(todo.clone())
    }

    pub fn delete_todo(&mut self, id: &str) -> bool {
        match self.todos.iter().position(|todo| todo.id == id) {
            Some(index) => {
                self.todos.remove(index);
                info!(id, "todo deleted");
                true
            }
            None => false,
        }
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }

    fn next_id(&mut self) -> String {
        match self.strategy {
            IdStrategy::Monotonic => {
                self.last_id += 1;
                self.last_id.to_string()
            }
            IdStrategy::LengthPlusOne => (self.todos.len() + 1).to_string(),
        }
    }
}
