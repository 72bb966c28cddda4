//! Route definitions for books.
//!
//! ```text
//! POST   /api/books/          -> create
//! GET    /api/books/          -> list (user_id, status, limit, offset)
//! GET    /api/books/{id}      -> get
//! PUT    /api/books/{id}      -> replace
//! DELETE /{id}                -> delete
//! ```

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::books;
use crate::state::AppState;

/// JSON API routes, mounted at the root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/books/", get(books::list).post(books::create))
        .route("/api/books/{id}", get(books::get).put(books::replace))
        .route("/{id}", delete(books::delete))
}
