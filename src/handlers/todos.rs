//! Todo endpoint handlers: validate, then call the store.
//!
//! The `{id}` segment arrives as a raw string and bodies arrive as raw
//! bytes so the validation pipeline owns every error message; the
//! framework's own rejections never reach the client. An invalid path id
//! is always reported before anything else.

use crate::error::AppError;
use crate::response::{ListResponse, Page};
use crate::service::query::ListQuery;
use crate::service::validation;
use crate::service::TodoService;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::collections::HashMap;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let query = ListQuery::from_params(&params)?;
    if query.bare {
        let items = TodoService::list_all(&state.pool).await?;
        return Ok(ListResponse::Bare(items));
    }
    let (items, total) = TodoService::query(&state.pool, &query).await?;
    Ok(ListResponse::Paged(Page {
        items,
        page: query.page,
        per_page: query.per_page,
        total,
    }))
}

pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let map = validation::parse_object(&body)?;
    let draft = validation::validate_create(&map)?;
    let todo = TodoService::create(&state.pool, &draft).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = validation::parse_path_id(&id)?;
    let todo = TodoService::get(&state.pool, id).await?;
    Ok(Json(todo))
}

pub async fn update_full(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let id = validation::parse_path_id(&id)?;
    let map = validation::parse_object(&body)?;
    let draft = validation::validate_put(&map)?;
    let todo = TodoService::update_full(&state.pool, id, &draft).await?;
    Ok(Json(todo))
}

pub async fn update_partial(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let id = validation::parse_path_id(&id)?;
    let map = validation::parse_object(&body)?;
    let draft = validation::validate_patch(&map)?;
    let todo = TodoService::update_partial(&state.pool, id, &draft).await?;
    Ok(Json(todo))
}

/// Convenience toggle; any request body is ignored.
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = validation::parse_path_id(&id)?;
    let todo = TodoService::set_completed(&state.pool, id, true).await?;
    Ok(Json(todo))
}

/// Convenience toggle; any request body is ignored.
pub async fn incomplete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = validation::parse_path_id(&id)?;
    let todo = TodoService::set_completed(&state.pool, id, false).await?;
    Ok(Json(todo))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = validation::parse_path_id(&id)?;
    TodoService::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
