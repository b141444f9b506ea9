//! Todo CRUD REST API backed by SQLite.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ValidationError};
pub use routes::app;
pub use service::{ListQuery, Todo, TodoService};
pub use state::AppState;
pub use store::{connect, ensure_schema};
