//! Query parameter types for API handlers.

use serde::Deserialize;
use shelf_core::status::ReadingStatus;
use shelf_core::types::OwnerId;
use shelf_db::models::book::BookFilter;

/// Filters for `GET /api/books/` (`?user_id=&status=&limit=&offset=`).
///
/// Limit and offset are clamped in the repository layer.
#[derive(Debug, Default, Deserialize)]
pub struct BookListParams {
    pub user_id: Option<OwnerId>,
    pub status: Option<ReadingStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<BookListParams> for BookFilter {
    fn from(params: BookListParams) -> Self {
        Self {
            user_id: params.user_id,
            status: params.status,
            limit: params.limit,
            offset: params.offset,
        }
    }
}
