//! HTML page routes.
//!
//! ```text
//! GET    /       -> index (20 most recent books)
//! GET    /add    -> add form
//! POST   /add    -> create from form, 303 to /
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/add", get(pages::add_form).post(pages::add_submit))
}
