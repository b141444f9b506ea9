//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Request-shape failures, detected before the store is consulted. Each
/// variant carries the exact user-facing message; only one is ever reported
/// per request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("id must be a positive integer")]
    InvalidPathId,
    #[error("Invalid JSON in request body")]
    MalformedBody,
    #[error("Request body must be a JSON object")]
    BodyNotObject,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be a {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
    #[error("title must not be blank")]
    BlankTitle,
    #[error("title must be 500 characters or fewer")]
    TitleTooLong,
    #[error("At least one field must be provided")]
    NoFieldsProvided,
    #[error("completed must be true or false")]
    BadCompletedParam,
    #[error("sort must be 'id' or 'title'")]
    BadSortParam,
    #[error("order must be 'asc' or 'desc'")]
    BadOrderParam,
    #[error("page must be a positive integer")]
    BadPageParam,
    #[error("per_page must be an integer between 1 and 100")]
    BadPerPageParam,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Todo not found")]
    NotFound,
    #[error("A todo with this title already exists")]
    DuplicateTitle,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// Every error response is this one flat shape: a single `detail` string.
#[derive(Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateTitle => StatusCode::CONFLICT,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let detail = match &self {
            AppError::Db(e) => {
                tracing::error!(error = %e, "database failure");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
