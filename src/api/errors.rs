use actix_web::{
    body::BoxBody,
    error::JsonPayloadError,
    http::{
        self,
        header::{self, HeaderValue},
    },
    HttpRequest, HttpResponse, ResponseError,
};
use derive_more::Display;
use serde_json::json;

use super::validation::FieldError;
use crate::store::StoreError;

#[derive(Debug, Display)]
pub enum TodoApiError {
    #[display(fmt = "Internal Server Error")]
    InternalServerError,

    #[display(fmt = "BadRequest: {}", _0)]
    BadRequest(String),

    /// Payload failed validation, `_0` is the message shown to the caller
    #[display(fmt = "{}", _0)]
    Validation(String, Vec<FieldError>),

    #[display(fmt = "{} not found", _0)]
    NotFound(String),
}

impl ResponseError for TodoApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            TodoApiError::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
            TodoApiError::BadRequest(_) | TodoApiError::Validation(..) => {
                http::StatusCode::BAD_REQUEST
            }
            TodoApiError::NotFound(_) => http::StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let mut res = HttpResponse::new(self.status_code());

        res.headers_mut().append(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let body = match self {
            TodoApiError::Validation(message, fields) => {
                json!({ "message": message, "fields": fields })
            }
            _ => json!({ "message": self.to_string() }),
        };

        res.set_body(BoxBody::new(body.to_string()))
    }
}

/// Store failures never reach the caller, only the log
impl From<StoreError> for TodoApiError {
    fn from(error: StoreError) -> Self {
        log::error!("Store error: {}", error);
        TodoApiError::InternalServerError
    }
}

/// Used as the `JsonConfig` error handler so malformed bodies get the same
/// JSON error shape as everything else
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected request body: {}", err);
    TodoApiError::BadRequest(err.to_string()).into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            TodoApiError::NotFound("Todo".into()).status_code(),
            http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            TodoApiError::Validation("bad".into(), vec![]).status_code(),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TodoApiError::from(StoreError::Backend("down".into())).status_code(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err = TodoApiError::from(StoreError::Duplicate("a1".into()));

        assert_eq!(err.to_string(), "Internal Server Error");
    }
}
