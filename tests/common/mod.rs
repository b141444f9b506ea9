//! Shared test fixtures: in-memory database and request helpers.

#![allow(dead_code)]

use axum::http::{self, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use todo_api::{app, ensure_schema, AppState, Todo};
use tower::ServiceExt;

/// Router backed by a fresh in-memory database. A single connection keeps
/// every query on the same in-memory instance.
pub async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    ensure_schema(&pool).await.unwrap();
    app(AppState { pool })
}

pub async fn send(app: &Router, req: Request<String>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

pub fn request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

pub async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

/// The `detail` string every error body carries.
pub async fn detail(response: Response) -> String {
    let value: serde_json::Value = body_json(response).await;
    value["detail"].as_str().expect("detail string").to_string()
}

pub async fn create_todo(app: &Router, title: &str) -> Todo {
    let body = serde_json::json!({ "title": title }).to_string();
    let resp = send(app, json_request("POST", "/todos", &body)).await;
    assert_eq!(resp.status(), http::StatusCode::CREATED);
    body_json(resp).await
}
