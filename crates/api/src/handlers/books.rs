//! Handlers for the `/api/books` JSON resource and `DELETE /{id}`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use shelf_core::types::DbId;
use shelf_db::models::book::CreateBook;
use shelf_db::repositories::BookRepo;
use shelf_db::StoreError;

use crate::error::{AppError, AppResult};
use crate::query::BookListParams;
use crate::response;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/books/
///
/// Create a book from a JSON body.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBook>,
) -> AppResult<impl IntoResponse> {
    let book = BookRepo::create(&state.pool, &input).await?;
    tracing::info!(book_id = book.id, user_id = book.user_id, "Book created via API");
    Ok(response::created(book))
}

/// GET /api/books/?user_id=&status=&limit=&offset=
///
/// List books newest first, optionally filtered by owner and status.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BookListParams>,
) -> AppResult<impl IntoResponse> {
    let books = BookRepo::list_filtered(&state.pool, &params.into()).await?;
    Ok(response::data(books))
}

/// GET /api/books/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let book = BookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::from(StoreError::book_not_found(id)))?;
    Ok(response::data(book))
}

/// PUT /api/books/{id}
///
/// Replace every mutable field of a book. Takes the same body as create.
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateBook>,
) -> AppResult<impl IntoResponse> {
    let book = BookRepo::replace(&state.pool, id, &input).await?;
    tracing::info!(book_id = id, "Book replaced via API");
    Ok(response::data(book))
}

/// DELETE /{id}
///
/// Returns 204 on success, 404 if the book does not exist.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    BookRepo::delete(&state.pool, id).await?;
    tracing::info!(book_id = id, "Book deleted via API");
    Ok(StatusCode::NO_CONTENT)
}
