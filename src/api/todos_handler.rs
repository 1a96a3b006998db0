use actix_web::{web, HttpResponse};

use super::dtos::todo::{CreateTodoDTO, MessageDTO, UpdateTodoDTO};
use super::errors::TodoApiError;
use super::validation::{validate_new_todo, validate_patch};
use crate::store::TodoStore;

const CREATE_FIELDS_MESSAGE: &str = "Please provide title, price, and id.";

/// Api handler returning every todo
pub async fn get_all(store: web::Data<dyn TodoStore>) -> Result<HttpResponse, TodoApiError> {
    let list = store.list().await?;

    Ok(HttpResponse::Ok().json(&list))
}

/// Create a new todo
pub async fn add_todo(
    request_data: web::Json<CreateTodoDTO>,
    store: web::Data<dyn TodoStore>,
) -> Result<HttpResponse, TodoApiError> {
    let new_todo = validate_new_todo(request_data.into_inner())
        .map_err(|fields| TodoApiError::Validation(CREATE_FIELDS_MESSAGE.into(), fields))?;

    let inserted = store.insert(new_todo).await?;

    log::debug!("Created todo {}", inserted.id);

    Ok(HttpResponse::Created().json(&inserted))
}

/// Replace the supplied fields of a todo
pub async fn update_todo(
    todo_id: web::Path<String>,
    request_data: web::Json<UpdateTodoDTO>,
    store: web::Data<dyn TodoStore>,
) -> Result<HttpResponse, TodoApiError> {
    let patch = validate_patch(request_data.into_inner())
        .map_err(|fields| TodoApiError::Validation("Invalid todo fields".into(), fields))?;

    match store.update(todo_id.as_str(), patch).await? {
        Some(todo) => Ok(HttpResponse::Ok().json(&todo)),
        None => Err(TodoApiError::NotFound(String::from("Todo"))),
    }
}

/// Api to Delete a TODO
pub async fn delete_todo(
    todo_id: web::Path<String>,
    store: web::Data<dyn TodoStore>,
) -> Result<HttpResponse, TodoApiError> {
    match store.remove(todo_id.as_str()).await? {
        Some(todo) => {
            log::debug!("Deleted todo {}", todo.id);

            Ok(HttpResponse::Ok().json(MessageDTO {
                message: String::from("Todo deleted"),
            }))
        }
        None => Err(TodoApiError::NotFound(String::from("Todo"))),
    }
}
