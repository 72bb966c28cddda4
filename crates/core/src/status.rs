//! Reading-progress status of a book.
//!
//! `ReadingStatus` is the single canonical representation used at the
//! store boundary. The database stores the lowercase English value and a
//! `CHECK` constraint mirrors [`VALID_STATUSES`]. Front-ends translate
//! their own surface forms into this enum before calling the store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_READ: &str = "read";
pub const STATUS_READING: &str = "reading";
pub const STATUS_PLANNED: &str = "planned";

/// All valid status values, in display order.
pub const VALID_STATUSES: &[&str] = &[STATUS_READ, STATUS_READING, STATUS_PLANNED];

// ---------------------------------------------------------------------------
// Enum
// ---------------------------------------------------------------------------

/// Where a reader is with a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    Read,
    Reading,
    Planned,
}

impl ReadingStatus {
    /// Every status, in display order.
    pub const ALL: [ReadingStatus; 3] = [Self::Read, Self::Reading, Self::Planned];

    /// Convert from the canonical (database) string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_READ => Ok(Self::Read),
            STATUS_READING => Ok(Self::Reading),
            STATUS_PLANNED => Ok(Self::Planned),
            _ => Err(CoreError::Validation(format!(
                "Invalid status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// Convert to the canonical (database) string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => STATUS_READ,
            Self::Reading => STATUS_READING,
            Self::Planned => STATUS_PLANNED,
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Used by `sqlx::FromRow` (`#[sqlx(try_from = "String")]`) when decoding
/// the `status` column.
impl TryFrom<String> for ReadingStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str_value(&value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
