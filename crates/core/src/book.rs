//! Book field limits, input normalization and the partial-update allow-list.
//!
//! Partial updates never build column lists from caller input. A caller
//! names a field, the name is resolved against [`BookField`], and the value
//! lands in a typed slot of [`BookPatch`]. The repository then writes a
//! fixed statement that only touches the slots that are set.

use std::fmt;

use crate::error::CoreError;
use crate::status::ReadingStatus;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Maximum author length in characters.
pub const MAX_AUTHOR_LENGTH: usize = 200;

/// Maximum genre length in characters.
pub const MAX_GENRE_LENGTH: usize = 100;

pub const FIELD_TITLE: &str = "title";
pub const FIELD_AUTHOR: &str = "author";
pub const FIELD_GENRE: &str = "genre";
pub const FIELD_STATUS: &str = "status";

/// Field names accepted by partial updates.
pub const ALLOWED_FIELDS: &[&str] = &[FIELD_TITLE, FIELD_AUTHOR, FIELD_GENRE, FIELD_STATUS];

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

fn required_text(label: &str, value: &str, max: usize) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{label} must not be empty")));
    }
    if trimmed.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{label} exceeds maximum length of {max}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim a title and check it is non-empty and within bounds.
pub fn normalize_title(title: &str) -> Result<String, CoreError> {
    required_text("Title", title, MAX_TITLE_LENGTH)
}

/// Trim an author and check it is non-empty and within bounds.
pub fn normalize_author(author: &str) -> Result<String, CoreError> {
    required_text("Author", author, MAX_AUTHOR_LENGTH)
}

/// Trim a genre. Blank genres become `None`.
pub fn normalize_genre(genre: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(trimmed) = genre.map(str::trim).filter(|g| !g.is_empty()) else {
        return Ok(None);
    };
    if trimmed.chars().count() > MAX_GENRE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Genre exceeds maximum length of {MAX_GENRE_LENGTH}"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// Build an `ILIKE` pattern matching `query` anywhere in a column.
///
/// `%`, `_` and `\` in the query are escaped so they match literally.
/// An empty query yields `%`, which matches every row.
pub fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Allow-list
// ---------------------------------------------------------------------------

/// A mutable book column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    Genre,
    Status,
}

impl BookField {
    /// Resolve a caller-supplied field name. Matching ignores ASCII case
    /// and surrounding whitespace.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name.trim().to_ascii_lowercase().as_str() {
            FIELD_TITLE => Ok(Self::Title),
            FIELD_AUTHOR => Ok(Self::Author),
            FIELD_GENRE => Ok(Self::Genre),
            FIELD_STATUS => Ok(Self::Status),
            _ => Err(CoreError::Validation(format!(
                "Unknown field '{}'. Must be one of: {}",
                name.trim(),
                ALLOWED_FIELDS.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => FIELD_TITLE,
            Self::Author => FIELD_AUTHOR,
            Self::Genre => FIELD_GENRE,
            Self::Status => FIELD_STATUS,
        }
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

/// A validated partial update. `None` slots are left untouched.
///
/// A genre can be replaced but not cleared through a patch; full-record
/// updates can clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub status: Option<ReadingStatus>,
}

impl BookPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field from its raw text value. Status values must be canonical.
    pub fn set(&mut self, field: BookField, value: &str) -> Result<(), CoreError> {
        match field {
            BookField::Title => self.title = Some(normalize_title(value)?),
            BookField::Author => self.author = Some(normalize_author(value)?),
            BookField::Genre => {
                let genre = normalize_genre(Some(value))?.ok_or_else(|| {
                    CoreError::Validation("Genre must not be empty".to_string())
                })?;
                self.genre = Some(genre);
            }
            BookField::Status => self.status = Some(ReadingStatus::from_str_value(value.trim())?),
        }
        Ok(())
    }

    /// Set a field by name, rejecting names outside [`ALLOWED_FIELDS`].
    pub fn set_named(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        self.set(BookField::from_name(name)?, value)
    }

    pub fn with_status(mut self, status: ReadingStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// `true` when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.genre.is_none() && self.status.is_none()
    }

    /// Reject empty patches, which would otherwise be silent no-ops.
    pub fn ensure_not_empty(&self) -> Result<(), CoreError> {
        if self.is_empty() {
            return Err(CoreError::Validation(format!(
                "No fields to update. Supported fields: {}",
                ALLOWED_FIELDS.join(", ")
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- normalization -------------------------------------------------------

    #[test]
    fn title_is_trimmed() {
        assert_eq!(normalize_title("  Dune ").unwrap(), "Dune");
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_matches!(normalize_title("   "), Err(CoreError::Validation(_)));
        assert_matches!(normalize_author(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn length_limits_count_characters_not_bytes() {
        let cyrillic = "ж".repeat(MAX_AUTHOR_LENGTH);
        assert!(normalize_author(&cyrillic).is_ok());

        let too_long = "a".repeat(MAX_AUTHOR_LENGTH + 1);
        assert_matches!(normalize_author(&too_long), Err(CoreError::Validation(msg)) if msg.contains("200"));
    }

    #[test]
    fn blank_genre_becomes_none() {
        assert_eq!(normalize_genre(None).unwrap(), None);
        assert_eq!(normalize_genre(Some("  ")).unwrap(), None);
        assert_eq!(normalize_genre(Some(" sci-fi ")).unwrap(), Some("sci-fi".to_string()));
    }

    #[test]
    fn overlong_genre_is_rejected() {
        let genre = "g".repeat(MAX_GENRE_LENGTH + 1);
        assert!(normalize_genre(Some(&genre)).is_err());
    }

    // -- contains_pattern ----------------------------------------------------

    #[test]
    fn pattern_wraps_query() {
        assert_eq!(contains_pattern("dune"), "%dune%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }

    #[test]
    fn empty_query_matches_everything() {
        assert_eq!(contains_pattern(""), "%%");
    }

    // -- BookField -----------------------------------------------------------

    #[test]
    fn allowed_field_names_resolve() {
        assert_eq!(BookField::from_name("title").unwrap(), BookField::Title);
        assert_eq!(BookField::from_name(" Status ").unwrap(), BookField::Status);
    }

    #[test]
    fn unknown_field_names_are_rejected() {
        for name in ["id", "user_id", "created_at", "title; DROP TABLE books", ""] {
            assert_matches!(BookField::from_name(name), Err(CoreError::Validation(_)), "{name}");
        }
    }

    // -- BookPatch -----------------------------------------------------------

    #[test]
    fn patch_collects_named_fields() {
        let mut patch = BookPatch::new();
        patch.set_named("title", " Dune Messiah ").unwrap();
        patch.set_named("status", "read").unwrap();

        assert_eq!(patch.title.as_deref(), Some("Dune Messiah"));
        assert_eq!(patch.status, Some(ReadingStatus::Read));
        assert_eq!(patch.author, None);
        assert_eq!(patch.genre, None);
    }

    #[test]
    fn patch_rejects_invalid_status() {
        let mut patch = BookPatch::new();
        assert_matches!(patch.set(BookField::Status, "done"), Err(CoreError::Validation(_)));
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_rejects_blank_genre() {
        let mut patch = BookPatch::new();
        assert!(patch.set(BookField::Genre, " ").is_err());
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert_matches!(BookPatch::new().ensure_not_empty(), Err(CoreError::Validation(_)));
        assert!(BookPatch::new()
            .with_status(ReadingStatus::Reading)
            .ensure_not_empty()
            .is_ok());
    }
}
