//! Normalized client-side cache of todos.
//!
//! # Design
//! Records are stored once, keyed by id, and the root `todos` list holds ids
//! in server order. After a mutation the cache is patched in place instead of
//! refetching: `append` (add), `write_completed` / `write_text` (replace one
//! field by id), `evict` (filter out by id). Patches naming an id the cache
//! does not hold are no-ops.
//!
//! Inline edits are two-phase. `begin_optimistic` stacks a pending layer that
//! reads see at once; `commit_optimistic` drops the layer and writes the
//! server's answer into the base records; `revert_optimistic` drops the layer
//! so reads fall back to the last confirmed text. Commits land in arrival
//! order, so the last response received wins.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::types::Todo;

/// Identifies one in-flight optimistic mutation.
pub type MutationId = Uuid;

#[derive(Debug, Clone)]
struct OptimisticLayer {
    mutation: MutationId,
    id: String,
    text: String,
}

#[derive(Debug, Default)]
pub struct TodoCache {
    records: HashMap<String, Todo>,
    list: Vec<String>,
    layers: Vec<OptimisticLayer>,
}

impl TodoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the root list with a fresh query result.
    ///
    /// The server can hand out duplicate ids; like any id-normalized cache,
    /// later records overwrite earlier ones and the id is listed once.
    pub fn write_todos(&mut self, todos: Vec<Todo>) {
        self.records.clear();
        self.list.clear();
        for todo in todos {
            if !self.records.contains_key(&todo.id) {
                self.list.push(todo.id.clone());
            }
            self.records.insert(todo.id.clone(), todo);
        }
        debug!(len = self.list.len(), "cache: wrote todos");
    }

    /// The cached list as the view should show it: base records with any
    /// pending optimistic text on top.
    pub fn todos(&self) -> Vec<Todo> {
        self.list
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// One record, optimistic layers applied.
    pub fn get(&self, id: &str) -> Option<Todo> {
        let mut todo = self.records.get(id)?.clone();
        if let Some(layer) = self.layers.iter().rev().find(|layer| layer.id == id) {
            todo.text = layer.text.clone();
        }
        Some(todo)
    }

    /// The last server-confirmed record, ignoring optimistic layers.
    pub fn confirmed(&self, id: &str) -> Option<&Todo> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn append(&mut self, todo: Todo) {
        debug!(id = %todo.id, "cache: append");
        if !self.records.contains_key(&todo.id) {
            self.list.push(todo.id.clone());
        }
        self.records.insert(todo.id.clone(), todo);
    }

    /// Returns whether a record was patched.
    pub fn write_completed(&mut self, id: &str, completed: bool) -> bool {
        match self.records.get_mut(id) {
            Some(todo) => {
                debug!(id, completed, "cache: write completed");
                todo.completed = completed;
                true
            }
            None => false,
        }
    }

    /// Returns whether a record was patched.
    pub fn write_text(&mut self, id: &str, text: String) -> bool {
        match self.records.get_mut(id) {
            Some(todo) => {
                debug!(id, "cache: write text");
                todo.text = text;
                true
            }
            None => false,
        }
    }

    /// Remove a record and any pending layers for it.
    pub fn evict(&mut self, id: &str) -> bool {
        if self.records.remove(id).is_none() {
            return false;
        }
        debug!(id, "cache: evict");
        self.list.retain(|listed| listed != id);
        self.layers.retain(|layer| layer.id != id);
        true
    }

    pub fn begin_optimistic(&mut self, id: &str, text: String) -> MutationId {
        let mutation = Uuid::new_v4();
        debug!(id, %mutation, "cache: optimistic text");
        self.layers.push(OptimisticLayer {
            mutation,
            id: id.to_string(),
            text,
        });
        mutation
    }

    /// Settle a pending edit with the server's answer. `None` means the
    /// server no longer holds the id, so it is evicted locally too.
    pub fn commit_optimistic(&mut self, mutation: MutationId, confirmed: Option<Todo>) {
        let layer = self.take_layer(mutation);
        match confirmed {
            Some(todo) => {
                self.write_text(&todo.id, todo.text);
            }
            None => {
                if let Some(layer) = layer {
                    self.evict(&layer.id);
                }
            }
        }
    }

    /// Drop a pending edit without touching the confirmed record.
    pub fn revert_optimistic(&mut self, mutation: MutationId) -> bool {
        let reverted = self.take_layer(mutation).is_some();
        if reverted {
            debug!(%mutation, "cache: reverted optimistic text");
        }
        reverted
    }

    pub fn pending(&self) -> usize {
        self.layers.len()
    }

    fn take_layer(&mut self, mutation: MutationId) -> Option<OptimisticLayer> {
        let index = self.layers.iter().position(|layer| layer.mutation == mutation)?;
        Some(self.layers.remove(index))
    }
}
