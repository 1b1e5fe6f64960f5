//! Server-side error types.
//!
//! `TodoApiError` is what the db layer surfaces; `ApiError` is the HTTP-facing
//! shape, converted into responses through actix's `ResponseError`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoApiError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(String),

    #[error("todo {0} not found")]
    TodoNotFound(uuid::Uuid),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// HTTP-facing error. The response body is `{error, status}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
            "status": self.status_code().as_u16(),
        }))
    }
}

impl From<TodoApiError> for ApiError {
    fn from(err: TodoApiError) -> Self {
        match err {
            TodoApiError::TodoNotFound(id) => Self::NotFound(format!("Todo {} not found", id)),
            TodoApiError::Validation(msg) => Self::BadRequest(msg),
            internal => {
                // Details stay in the log, not in the response body.
                log::error!("Request failed: {}", internal);
                Self::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

pub type TodoResult<T> = Result<T, TodoApiError>;
