use reqwest::{
    blocking::{Client, Response},
    header::CONTENT_TYPE,
    StatusCode, Url,
};

use crate::{
    errors::TodoError,
    models::todo_model::{NewTodo, Todo, TodoPatch},
};

/// Blocking client for the todo REST API
pub struct TodoClient {
    http: Client,
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the url for `segments`, each one percent-encoded
    pub fn make_api_url(&self, segments: &[&str]) -> Result<Url, TodoError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| TodoError::HttpError(format!("Invalid api url: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| TodoError::HttpError(format!("Invalid api url: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    pub fn list(&self) -> Result<Vec<Todo>, TodoError> {
        let response = self.http.get(self.make_api_url(&["getall"])?).send()?;

        Ok(handle_response(response)?.json()?)
    }

    pub fn create(&self, new_todo: &NewTodo) -> Result<Todo, TodoError> {
        let response = self
            .http
            .post(self.make_api_url(&["add"])?)
            .header(CONTENT_TYPE, "application/json")
            .json(new_todo)
            .send()?;

        Ok(handle_response(response)?.json()?)
    }

    pub fn update(&self, id: &str, patch: &TodoPatch) -> Result<Todo, TodoError> {
        let response = self
            .http
            .put(self.make_api_url(&["update", id])?)
            .header(CONTENT_TYPE, "application/json")
            .json(patch)
            .send()?;

        Ok(handle_response(response)?.json()?)
    }

    /// Returns the server's confirmation message
    pub fn delete(&self, id: &str) -> Result<String, TodoError> {
        let response = self.http.delete(self.make_api_url(&["delete", id])?).send()?;

        let body: serde_json::Value = handle_response(response)?.json()?;

        Ok(message_of(&body).unwrap_or("Todo deleted").to_string())
    }
}

fn message_of(body: &serde_json::Value) -> Option<&str> {
    body.get("message").and_then(|m| m.as_str())
}

/// Handle http request response
fn handle_response(response: Response) -> Result<Response, TodoError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();

    log::debug!("{} response: {}", status, body);

    Err(error_for_status(status, &body))
}

fn error_for_status(status: StatusCode, body: &str) -> TodoError {
    match status {
        StatusCode::BAD_REQUEST => {
            let message = serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| message_of(&v).map(String::from))
                .unwrap_or_else(|| String::from("Bad request"));

            TodoError::BadRequest(message)
        }
        StatusCode::NOT_FOUND => TodoError::NotFound,
        _ => TodoError::ServerError(status),
    }
}
