//! HTTP handlers for the todo endpoints.

pub mod todos;
