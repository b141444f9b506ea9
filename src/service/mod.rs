//! TodoService plus the pure validation and list-query logic.

pub mod query;
pub mod todos;
pub mod validation;

pub use query::ListQuery;
pub use todos::{Todo, TodoService};
