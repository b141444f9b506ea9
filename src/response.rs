//! List response shapes: legacy bare array or pagination envelope.

use crate::service::todos::Todo;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Pagination envelope returned whenever the list request carries any
/// query parameter.
#[derive(Serialize)]
pub struct Page {
    pub items: Vec<Todo>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

/// A request with zero query parameters gets the bare array the original
/// clients expect; anything else gets the envelope.
pub enum ListResponse {
    Bare(Vec<Todo>),
    Paged(Page),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            ListResponse::Bare(items) => Json(items).into_response(),
            ListResponse::Paged(page) => Json(page).into_response(),
        }
    }
}
