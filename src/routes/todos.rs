//! Todo route table.

use crate::handlers::todos::{
    complete, create, delete as delete_handler, incomplete, list, read, update_full,
    update_partial,
};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn todo_routes(state: AppState) -> Router {
    Router::new()
        .route("/todos", get(list).post(create))
        .route(
            "/todos/:id",
            get(read)
                .put(update_full)
                .patch(update_partial)
                .delete(delete_handler),
        )
        .route("/todos/:id/complete", post(complete))
        .route("/todos/:id/incomplete", post(incomplete))
        .with_state(state)
}
