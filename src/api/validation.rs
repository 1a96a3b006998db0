use serde::{Deserialize, Serialize};

use super::dtos::todo::{CreateTodoDTO, UpdateTodoDTO};
use crate::models::todo_model::{NewTodo, TodoPatch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("{} is required", field),
        }
    }
}

/// Present and not blank
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Check a create payload before it reaches the store
pub fn validate_new_todo(dto: CreateTodoDTO) -> Result<NewTodo, Vec<FieldError>> {
    let mut errors = vec![];

    let title = non_empty(dto.title);
    if title.is_none() {
        errors.push(FieldError::required("title"));
    }

    let price = dto.price.filter(|p| p.is_finite());
    if price.is_none() {
        errors.push(FieldError::required("price"));
    }

    let id = non_empty(dto.id);
    if id.is_none() {
        errors.push(FieldError::required("id"));
    }

    match (id, title, price) {
        (Some(id), Some(title), Some(price)) => Ok(NewTodo {
            id,
            title,
            image: dto.image,
            price,
        }),
        _ => Err(errors),
    }
}

/// A patch may omit anything, but a supplied title can't be blank
pub fn validate_patch(dto: UpdateTodoDTO) -> Result<TodoPatch, Vec<FieldError>> {
    let mut errors = vec![];

    if let Some(title) = &dto.title {
        if title.trim().is_empty() {
            errors.push(FieldError {
                field: "title".into(),
                message: "title cannot be empty".into(),
            });
        }
    }

    if let Some(price) = dto.price {
        if !price.is_finite() {
            errors.push(FieldError {
                field: "price".into(),
                message: "price must be a number".into(),
            });
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(TodoPatch {
        title: dto.title,
        completed: dto.completed,
        image: dto.image,
        price: dto.price,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn fields(errors: Vec<FieldError>) -> Vec<String> {
        errors.into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_create() {
        let new_todo = validate_new_todo(CreateTodoDTO {
            id: Some("a1".into()),
            title: Some("Book".into()),
            price: Some(9.99),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(new_todo.id, "a1");
        assert_eq!(new_todo.image, None);
    }

    #[test]
    fn test_create_reports_every_missing_field() {
        let errors = validate_new_todo(CreateTodoDTO::default()).unwrap_err();

        assert_eq!(fields(errors), vec!["title", "price", "id"]);
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let errors = validate_new_todo(CreateTodoDTO {
            id: Some("".into()),
            title: Some("   ".into()),
            price: Some(0.0),
            ..Default::default()
        })
        .unwrap_err();

        assert_eq!(fields(errors), vec!["title", "id"]);
    }

    #[test]
    fn test_patch_rejects_blank_title() {
        let errors = validate_patch(UpdateTodoDTO {
            title: Some("".into()),
            ..Default::default()
        })
        .unwrap_err();

        assert_eq!(fields(errors), vec!["title"]);
    }

    #[test]
    fn test_empty_patch_is_valid() {
        let patch = validate_patch(UpdateTodoDTO::default()).unwrap();

        assert_eq!(patch.is_empty(), true);
    }
}
