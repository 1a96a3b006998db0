use serde::{Deserialize, Serialize};

/// Image every new form starts with
pub const DEFAULT_IMAGE_URL: &str = "https://images.pexels.com/photos/277390/pexels-photo-277390.jpeg?cs=srgb&dl=pexels-pixabay-277390.jpg&fm=jpg";

/// A stored todo item.
///
/// `id` is chosen by the caller and is unrelated to the store's own
/// record key, which never leaves the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub price: f64,
}

/// Validated input for creating a todo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTodo {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub price: f64,
}

/// Partial replacement of a todo's fields, `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Todo {
    /// New todos always start out pending
    pub fn from_new(new_todo: NewTodo) -> Self {
        Self {
            id: new_todo.id,
            title: new_todo.title,
            completed: false,
            image: new_todo.image,
            price: new_todo.price,
        }
    }

    pub fn apply(&mut self, patch: TodoPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.completed.is_none()
            && self.image.is_none()
            && self.price.is_none()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn book() -> Todo {
        Todo::from_new(NewTodo {
            id: "a1".into(),
            title: "Book".into(),
            image: None,
            price: 9.99,
        })
    }

    #[test]
    fn test_new_todo_is_pending() {
        assert_eq!(book().completed, false);
    }

    #[test]
    fn test_apply_keeps_omitted_fields() {
        let mut todo = book();

        todo.apply(TodoPatch::completed(true));

        assert_eq!(todo.completed, true);
        assert_eq!(todo.title, "Book");
        assert_eq!(todo.price, 9.99);
    }

    #[test]
    fn test_patch_serializes_only_supplied_fields() {
        let json = serde_json::to_value(TodoPatch::completed(false)).unwrap();

        assert_eq!(json, serde_json::json!({ "completed": false }));
    }

    #[test]
    fn test_todo_ignores_store_fields() {
        let todo: Todo = serde_json::from_value(serde_json::json!({
            "_id": "6523f0c2a1b2c3d4e5f60718",
            "id": "a1",
            "title": "Book",
            "price": 9.99,
            "__v": 0
        }))
        .unwrap();

        assert_eq!(todo, book());
    }
}
