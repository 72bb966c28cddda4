//! Success bodies for the `/api/books` resource.
//!
//! Every successful JSON reply is `{ "data": ... }`; errors use the
//! `{ "error", "code" }` shape from [`crate::error`].

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// `200 OK` with `payload` in the envelope.
pub fn data<T: Serialize>(payload: T) -> Json<DataResponse<T>> {
    Json(DataResponse { data: payload })
}

/// `201 Created` with the new record in the envelope.
pub fn created<T: Serialize>(payload: T) -> (StatusCode, Json<DataResponse<T>>) {
    (StatusCode::CREATED, data(payload))
}
