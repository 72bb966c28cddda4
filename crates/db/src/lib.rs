//! Book Record Store: connection pool, migrations and the `books` repository.
//!
//! Both front-ends (HTTP and chat bot) go through [`repositories::BookRepo`];
//! nothing else in the workspace issues SQL.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod error;
pub mod models;
pub mod repositories;

pub use error::StoreError;

pub type DbPool = sqlx::PgPool;

/// Embedded migrations from `crates/db/migrations`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while reading database configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub connect_options: PgConnectOptions,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load settings from the process environment.
    ///
    /// | Env Var             | Default | Notes                                  |
    /// |---------------------|---------|----------------------------------------|
    /// | `DATABASE_URL`      | --      | Takes precedence over the parts below  |
    /// | `POSTGRES_HOST`     | --      | Required without `DATABASE_URL`        |
    /// | `POSTGRES_PORT`     | `5432`  |                                        |
    /// | `POSTGRES_USER`     | --      | Required without `DATABASE_URL`        |
    /// | `POSTGRES_PASSWORD` | empty   |                                        |
    /// | `POSTGRES_DB`       | --      | Required without `DATABASE_URL`        |
    /// | `DB_MAX_CONNECTIONS`| `10`    |                                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let connect_options = match lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .map_err(|e| ConfigError::Invalid {
                    name: "DATABASE_URL",
                    reason: e.to_string(),
                })?,
            None => {
                let host = lookup("POSTGRES_HOST").ok_or(ConfigError::Missing("POSTGRES_HOST"))?;
                let user = lookup("POSTGRES_USER").ok_or(ConfigError::Missing("POSTGRES_USER"))?;
                let database = lookup("POSTGRES_DB").ok_or(ConfigError::Missing("POSTGRES_DB"))?;
                let port = match lookup("POSTGRES_PORT").filter(|v| !v.is_empty()) {
                    Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                        name: "POSTGRES_PORT",
                        reason: e.to_string(),
                    })?,
                    None => 5432,
                };

                let mut options = PgConnectOptions::new()
                    .host(&host)
                    .port(port)
                    .username(&user)
                    .database(&database);
                if let Some(password) = lookup("POSTGRES_PASSWORD") {
                    options = options.password(&password);
                }
                options
            }
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().map_err(|e| ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            connect_options,
            max_connections,
        })
    }
}

/// Create a connection pool from database settings.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options.clone())
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Newest migration version embedded in this build.
pub fn expected_schema_version() -> Option<i64> {
    MIGRATOR.iter().map(|m| m.version).max()
}

/// Newest migration version successfully applied to the database.
///
/// `None` when no migration has been applied yet. Fails if the migrations
/// table does not exist.
pub async fn applied_schema_version(pool: &DbPool) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations WHERE success")
        .fetch_one(pool)
        .await
}
