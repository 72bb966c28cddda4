/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Owner identifier (Telegram user id or HTTP-supplied account id).
pub type OwnerId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
