//! Repository for the `books` table.
//!
//! Every method runs a single parameterized statement. Owner-scoped reads
//! (`list_page`, `search`, `monthly_completion_count`) always filter on
//! `user_id`; id-addressed writes do not.

use shelf_core::book::{contains_pattern, BookPatch};
use shelf_core::pagination::{
    clamp_limit, clamp_offset, page_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, PAGE_SIZE,
};
use shelf_core::status::ReadingStatus;
use shelf_core::types::{DbId, OwnerId};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::book::{Book, BookFilter, CreateBook};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, author, genre, status, created_at";

/// Provides all reads and writes against `books`.
pub struct BookRepo;

impl BookRepo {
    /// Validate and insert a new book, returning the created row.
    ///
    /// `id` and `created_at` are assigned by the database.
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, StoreError> {
        let input = input.normalized()?;
        let query = format!(
            "INSERT INTO books (user_id, title, author, genre, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.genre)
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await?;

        tracing::debug!(book_id = book.id, user_id = book.user_id, "Book created");
        Ok(book)
    }

    /// Find a book by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(book)
    }

    /// One page (at most [`PAGE_SIZE`] rows) of an owner's books, by ascending id.
    ///
    /// Pages are 1-based; anything below 1 is page 1. Pages past the end
    /// are empty.
    pub async fn list_page(
        pool: &PgPool,
        owner: OwnerId,
        page: i64,
    ) -> Result<Vec<Book>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM books \
             WHERE user_id = $1 \
             ORDER BY id \
             LIMIT $2 OFFSET $3"
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(owner)
            .bind(PAGE_SIZE)
            .bind(page_offset(page))
            .fetch_all(pool)
            .await?;
        Ok(books)
    }

    /// An owner's books whose title or author contains `query`, ignoring case.
    ///
    /// Ordered by ascending id. An empty query matches every owned book.
    pub async fn search(
        pool: &PgPool,
        owner: OwnerId,
        query_text: &str,
    ) -> Result<Vec<Book>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM books \
             WHERE user_id = $1 AND (title ILIKE $2 OR author ILIKE $2) \
             ORDER BY id"
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(owner)
            .bind(contains_pattern(query_text))
            .fetch_all(pool)
            .await?;
        Ok(books)
    }

    /// Newest books across all owners.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Book>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM books \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1"
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(limit.max(1))
            .fetch_all(pool)
            .await?;
        Ok(books)
    }

    /// Filtered listing, newest first. Limit and offset are clamped.
    pub async fn list_filtered(pool: &PgPool, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM books \
             WHERE ($1::BIGINT IS NULL OR user_id = $1) \
               AND ($2::TEXT IS NULL OR status = $2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(filter.user_id)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await?;
        Ok(books)
    }

    /// Rewrite exactly the fields set in `patch`, returning the updated row.
    ///
    /// Empty patches are rejected rather than treated as a no-op.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        patch: &BookPatch,
    ) -> Result<Book, StoreError> {
        patch.ensure_not_empty()?;
        let query = format!(
            "UPDATE books SET \
                title = COALESCE($2, title), \
                author = COALESCE($3, author), \
                genre = COALESCE($4, genre), \
                status = COALESCE($5, status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&patch.title)
            .bind(&patch.author)
            .bind(&patch.genre)
            .bind(patch.status.map(|s| s.as_str()))
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::book_not_found(id))?;

        tracing::debug!(book_id = id, "Book fields updated");
        Ok(book)
    }

    /// Overwrite every mutable column, including the owner. A `None` genre
    /// clears it.
    pub async fn replace(pool: &PgPool, id: DbId, input: &CreateBook) -> Result<Book, StoreError> {
        let input = input.normalized()?;
        let query = format!(
            "UPDATE books SET \
                user_id = $2, title = $3, author = $4, genre = $5, status = $6 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.genre)
            .bind(input.status.as_str())
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| StoreError::book_not_found(id))?;

        tracing::debug!(book_id = id, "Book replaced");
        Ok(book)
    }

    /// Delete a book. Missing ids surface as `NotFound`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::book_not_found(id));
        }

        tracing::debug!(book_id = id, "Book deleted");
        Ok(())
    }

    /// Number of the owner's books marked `read` that were created in the
    /// current calendar month, by the database clock.
    pub async fn monthly_completion_count(pool: &PgPool, owner: OwnerId) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM books \
             WHERE user_id = $1 \
               AND status = $2 \
               AND date_trunc('month', created_at) = date_trunc('month', now())",
        )
        .bind(owner)
        .bind(ReadingStatus::Read.as_str())
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
