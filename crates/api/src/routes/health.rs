//! `GET /health`: liveness plus a check that the `books` schema is current.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    pub version: &'static str,
    pub database_reachable: bool,
    /// Newest applied migration, `None` if unknown.
    pub schema_version: Option<i64>,
    /// Newest migration this binary ships.
    pub expected_schema_version: Option<i64>,
}

impl HealthReport {
    fn is_ok(&self) -> bool {
        self.database_reachable && self.schema_version == self.expected_schema_version
    }
}

/// Answers 200 when the database is reachable and fully migrated,
/// 503 otherwise. The body is the same in both cases.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let database_reachable = shelf_db::health_check(&state.pool).await.is_ok();
    let schema_version = if database_reachable {
        shelf_db::applied_schema_version(&state.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Could not read applied migrations");
                None
            })
    } else {
        None
    };

    let mut report = HealthReport {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database_reachable,
        schema_version,
        expected_schema_version: shelf_db::expected_schema_version(),
    };

    if report.is_ok() {
        (StatusCode::OK, Json(report))
    } else {
        report.status = "degraded";
        tracing::warn!(
            database_reachable = report.database_reachable,
            schema_version = ?report.schema_version,
            "Health check degraded"
        );
        (StatusCode::SERVICE_UNAVAILABLE, Json(report))
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
