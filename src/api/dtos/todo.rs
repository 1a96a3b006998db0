use serde::{Deserialize, Serialize};

/// Body of `POST /add`, every field optional so missing ones can be reported.
/// Anything else in the body, `completed` included, is ignored.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateTodoDTO {
    pub id: Option<String>,
    pub title: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
}

/// Body of `PUT /update/{id}`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateTodoDTO {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub image: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MessageDTO {
    pub message: String,
}
