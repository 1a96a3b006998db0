use std::sync::Mutex;

use async_trait::async_trait;

use super::{StoreError, TodoStore};
use crate::models::todo_model::{NewTodo, Todo, TodoPatch};

/// Keeps todos in insertion order for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: Mutex<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_items(todos: Vec<Todo>) -> Self {
        Self {
            todos: Mutex::new(todos),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Todo>>, StoreError> {
        self.todos
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.lock()?.clone())
    }

    async fn insert(&self, new_todo: NewTodo) -> Result<Todo, StoreError> {
        let mut todos = self.lock()?;

        if todos.iter().any(|t| t.id == new_todo.id) {
            return Err(StoreError::Duplicate(new_todo.id));
        }

        let todo = Todo::from_new(new_todo);
        todos.push(todo.clone());

        Ok(todo)
    }

    async fn update(&self, id: &str, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.lock()?;

        Ok(todos.iter_mut().find(|t| t.id == id).map(|todo| {
            todo.apply(patch);
            todo.clone()
        }))
    }

    async fn remove(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.lock()?;

        Ok(todos
            .iter()
            .position(|t| t.id == id)
            .map(|index| todos.remove(index)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn new_todo(id: &str, title: &str) -> NewTodo {
        NewTodo {
            id: id.into(),
            title: title.into(),
            image: None,
            price: 1.5,
        }
    }

    #[actix_web::test]
    async fn test_list_keeps_insertion_order() {
        let store = MemoryStore::new();

        store.insert(new_todo("b", "Second")).await.unwrap();
        store.insert(new_todo("a", "First")).await.unwrap();

        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|t| t.id).collect();

        assert_eq!(ids, vec!["b", "a"]);
    }

    #[actix_web::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = MemoryStore::new();

        store.insert(new_todo("a1", "Book")).await.unwrap();
        let res = store.insert(new_todo("a1", "Other")).await;

        assert!(matches!(res, Err(StoreError::Duplicate(_))));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_update_missing_returns_none() {
        let store = MemoryStore::new();

        let res = store.update("nope", TodoPatch::completed(true)).await.unwrap();

        assert_eq!(res, None);
    }

    #[actix_web::test]
    async fn test_remove_only_matching() {
        let store = MemoryStore::new();
        store.insert(new_todo("a", "A")).await.unwrap();
        store.insert(new_todo("b", "B")).await.unwrap();

        let removed = store.remove("a").await.unwrap().unwrap();

        assert_eq!(removed.id, "a");
        assert_eq!(store.list().await.unwrap()[0].id, "b");
        assert_eq!(store.remove("a").await.unwrap(), None);
    }
}
