//! Router assembly and error-shape fallbacks.

mod common;
mod todos;

pub use common::common_routes;
pub use todos::todo_routes;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;
use axum::{
    http::StatusCode,
    middleware::map_response,
    response::{IntoResponse, Response},
    Json, Router,
};

/// The full application router.
///
/// axum answers a known path with an unsupported method with a bare 405;
/// the response mapper rewrites that into the `{"detail": ...}` shape
/// every other error uses. Unknown paths get the same shape via the
/// fallback.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(todo_routes(state))
        .fallback(unknown_path)
        .layer(map_response(method_not_allowed_body))
}

async fn unknown_path() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            detail: "Not found".to_string(),
        }),
    )
        .into_response()
}

async fn method_not_allowed_body(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return AppError::MethodNotAllowed.into_response();
    }
    response
}
