pub mod config;
pub mod domains;
pub mod health;
pub mod plugin_services;
pub mod plugins;
pub mod routes;

use axum::http::StatusCode;
use axum::response::Json;
use portico_core::{PorticoError, Record, Result};
use serde::Serialize;
use serde_json::{Value, json};

/// Path ids that are not plain decimal digits name no record.
pub(crate) fn parse_id<T: Record>(raw: &str) -> Result<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PorticoError::NotFound(T::KIND));
    }
    raw.parse().map_err(|_| PorticoError::NotFound(T::KIND))
}

/// `{"data": [...], "count": n}`
pub(crate) fn list_body<T: Serialize>(items: Vec<T>) -> (StatusCode, Json<Value>) {
    let count = items.len();
    (StatusCode::OK, Json(json!({ "data": items, "count": count })))
}

/// `{"data": {...}}`
pub(crate) fn data_body<T: Serialize>(status: StatusCode, item: T) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "data": item })))
}

/// `{"message": "..."}`
pub(crate) fn message_body(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "message": message })))
}
