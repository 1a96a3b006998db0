use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Client, Collection, IndexModel,
};

use super::{StoreError, TodoStore};
use crate::models::todo_model::{NewTodo, Todo, TodoPatch};

const COLLECTION: &str = "todos";
const DUPLICATE_KEY: i32 = 11000;

/// Todos kept in a MongoDB collection.
///
/// Documents carry the driver's own `_id` next to the caller's `id`; only
/// `id` is ever used for lookups.
pub struct MongoStore {
    client: Client,
    todos: Collection<Todo>,
}

impl MongoStore {
    /// Connect and make sure `id` is uniquely indexed
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let todos = client.database(database).collection::<Todo>(COLLECTION);

        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        todos.create_index(index, None).await?;

        log::info!("Connected to MongoDB database {}", database);

        Ok(Self { client, todos })
    }
}

fn set_document(patch: TodoPatch) -> Document {
    let mut set = Document::new();

    if let Some(title) = patch.title {
        set.insert("title", title);
    }
    if let Some(completed) = patch.completed {
        set.insert("completed", completed);
    }
    if let Some(image) = patch.image {
        set.insert("image", image);
    }
    if let Some(price) = patch.price {
        set.insert("price", price);
    }

    set
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let cursor = self.todos.find(None, None).await?;

        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, new_todo: NewTodo) -> Result<Todo, StoreError> {
        let todo = Todo::from_new(new_todo);

        match self.todos.insert_one(&todo, None).await {
            Ok(_) => Ok(todo),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::Duplicate(todo.id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, id: &str, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        // `$set` with no fields is rejected by the server
        if patch.is_empty() {
            return Ok(self.todos.find_one(doc! { "id": id }, None).await?);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .todos
            .find_one_and_update(doc! { "id": id }, doc! { "$set": set_document(patch) }, options)
            .await?;

        Ok(updated)
    }

    async fn remove(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        Ok(self
            .todos
            .find_one_and_delete(doc! { "id": id }, None)
            .await?)
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        log::info!("MongoDB client shut down");
    }
}

fn is_duplicate_key(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

impl From<MongoError> for StoreError {
    fn from(error: MongoError) -> Self {
        StoreError::Backend(error.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_set_document_only_has_supplied_fields() {
        let set = set_document(TodoPatch {
            title: Some("Book".into()),
            price: Some(2.5),
            ..Default::default()
        });

        assert_eq!(set, doc! { "title": "Book", "price": 2.5 });
    }

    #[test]
    fn test_set_document_for_toggle() {
        assert_eq!(
            set_document(TodoPatch::completed(true)),
            doc! { "completed": true }
        );
    }
}
