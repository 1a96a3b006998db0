use std::fmt::Display;

use reqwest::StatusCode;

/// Failures seen by the client side of the app
#[derive(Debug)]
pub enum TodoError {
    /// Request never got a response
    HttpError(String),
    /// Server rejected the input, carries its message
    BadRequest(String),
    NotFound,
    ServerError(StatusCode),
    /// Unexpected response body
    InvalidResponse(String),
}

impl Display for TodoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpError(e) => {
                write!(f, "Request failed: {}", e)
            }
            Self::BadRequest(message) => {
                write!(f, "{}", message)
            }
            Self::NotFound => {
                write!(f, "Todo not found")
            }
            Self::ServerError(status) => {
                write!(f, "Server error ({})", status)
            }
            Self::InvalidResponse(e) => {
                write!(f, "Invalid response: {}", e)
            }
        }
    }
}

impl From<reqwest::Error> for TodoError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return TodoError::InvalidResponse(e.to_string());
        }
        TodoError::HttpError(e.to_string())
    }
}

impl std::error::Error for TodoError {}
