//! Book entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelf_core::book::{normalize_author, normalize_genre, normalize_title};
use shelf_core::error::CoreError;
use shelf_core::status::ReadingStatus;
use shelf_core::types::{DbId, OwnerId, Timestamp};
use sqlx::FromRow;

/// A row from the `books` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub user_id: OwnerId,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ReadingStatus,
    pub created_at: Timestamp,
}

/// DTO for creating a book, also used for full-record replacement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBook {
    pub user_id: OwnerId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: Option<String>,
    pub status: ReadingStatus,
}

impl CreateBook {
    /// Return a trimmed copy, or the first validation failure.
    ///
    /// Owners must be positive; blank genres become `None`.
    pub fn normalized(&self) -> Result<Self, CoreError> {
        if self.user_id <= 0 {
            return Err(CoreError::Validation(
                "user_id must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            user_id: self.user_id,
            title: normalize_title(&self.title)?,
            author: normalize_author(&self.author)?,
            genre: normalize_genre(self.genre.as_deref())?,
            status: self.status,
        })
    }
}

/// Filters for the cross-owner listing. `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub user_id: Option<OwnerId>,
    pub status: Option<ReadingStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
