//! Persistence for todos.
//!
//! Handlers only see [`TodoStore`]; the server picks an implementation at
//! start-up and hands it to every worker as shared app data.

mod memory;
mod mongo;

use async_trait::async_trait;
use derive_more::Display;

use crate::models::todo_model::{NewTodo, Todo, TodoPatch};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "Store backend error: {}", _0)]
    Backend(String),

    #[display(fmt = "Duplicate todo id {}", _0)]
    Duplicate(String),
}

impl std::error::Error for StoreError {}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All todos in the store's natural order
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// Persist a new todo, rejecting an `id` that already exists
    async fn insert(&self, new_todo: NewTodo) -> Result<Todo, StoreError>;

    /// Apply `patch` to the todo with `id`, `None` when there is no such todo
    async fn update(&self, id: &str, patch: TodoPatch) -> Result<Option<Todo>, StoreError>;

    /// Remove the todo with `id`, returning what was removed
    async fn remove(&self, id: &str) -> Result<Option<Todo>, StoreError>;

    /// Release connections. Called once after the server stops.
    async fn shutdown(&self) {}
}
