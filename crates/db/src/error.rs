use shelf_core::error::CoreError;
use shelf_core::types::DbId;

/// Errors returned by the Book Record Store.
///
/// Domain failures (validation, missing rows) travel as [`CoreError`];
/// anything the database or pool reports is [`StoreError::Unavailable`].
/// Callers must not assume partial success on `Unavailable`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

impl StoreError {
    /// A missing `books` row.
    pub fn book_not_found(id: DbId) -> Self {
        Self::Core(CoreError::NotFound { entity: "Book", id })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(CoreError::NotFound { .. }))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Core(CoreError::Validation(_)))
    }
}
