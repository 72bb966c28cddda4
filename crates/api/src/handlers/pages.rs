//! Server-rendered HTML pages: the recent-books index and the add form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use shelf_core::error::CoreError;
use shelf_core::pagination::RECENT_LIMIT;
use shelf_core::status::ReadingStatus;
use shelf_core::types::OwnerId;
use shelf_db::models::book::CreateBook;
use shelf_db::repositories::BookRepo;
use shelf_db::StoreError;

use crate::error::AppResult;
use crate::html;
use crate::state::AppState;

/// Fields posted by the add form.
#[derive(Debug, Clone, Deserialize)]
pub struct BookForm {
    pub user_id: OwnerId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: Option<String>,
    pub status: ReadingStatus,
}

impl From<&BookForm> for CreateBook {
    fn from(form: &BookForm) -> Self {
        Self {
            user_id: form.user_id,
            title: form.title.clone(),
            author: form.author.clone(),
            genre: form.genre.clone(),
            status: form.status,
        }
    }
}

/// GET /
///
/// The most recent books across all owners.
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = BookRepo::list_recent(&state.pool, RECENT_LIMIT).await?;
    Ok(Html(html::render_index(&books)))
}

/// GET /add
pub async fn add_form() -> Html<String> {
    Html(html::render_add_form(None, None))
}

/// POST /add
///
/// Creates the book and redirects to `/` with 303 See Other. Validation
/// failures re-render the form with the submitted values and a 400.
pub async fn add_submit(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match BookRepo::create(&state.pool, &CreateBook::from(&form)).await {
        Ok(book) => {
            tracing::info!(book_id = book.id, user_id = book.user_id, "Book created via form");
            Ok(Redirect::to("/").into_response())
        }
        Err(StoreError::Core(CoreError::Validation(msg))) => Ok((
            StatusCode::BAD_REQUEST,
            Html(html::render_add_form(Some(&msg), Some(&form))),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}
