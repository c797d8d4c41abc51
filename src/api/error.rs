use axum::{Json, http::StatusCode};
use serde_json::{Map, Value};

use crate::spotify::CatalogError;

/// Builds an error body: `{"error": ..., "message"?: ..., "details"?: ...}`.
pub fn error_body(error: &str, message: Option<&str>, details: Option<&str>) -> Value {
    let mut body = Map::new();
    body.insert("error".to_string(), Value::from(error));
    if let Some(message) = message {
        body.insert("message".to_string(), Value::from(message));
    }
    if let Some(details) = details {
        body.insert("details".to_string(), Value::from(details));
    }
    Value::Object(body)
}

/// Maps a failed catalog lookup to the proxy's response.
///
/// Upstream failures keep the provider's status and report `upstream_error`
/// with the provider's body text as details.
pub fn catalog_failure(err: &CatalogError, upstream_error: &str) -> (StatusCode, Json<Value>) {
    match err {
        CatalogError::MissingParameter(message) => (
            StatusCode::BAD_REQUEST,
            Json(error_body("Missing query parameter", Some(message), None)),
        ),
        CatalogError::Upstream { status, body } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            Json(error_body(upstream_error, None, Some(body))),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(error_body(
                "Internal server error",
                Some(&other.to_string()),
                None,
            )),
        ),
    }
}
