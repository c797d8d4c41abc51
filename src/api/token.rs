use axum::{
    Extension, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{api::error_body, spotify::SpotifyCatalog, warning};

pub async fn access_token(Extension(catalog): Extension<SpotifyCatalog>) -> Response {
    match catalog.access_token().await {
        Ok(token) => Json(json!({ "accessToken": token })).into_response(),
        Err(e) => {
            warning!("Access token error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(error_body(
                    "Failed to get access token",
                    Some(&e.to_string()),
                    None,
                )),
            )
                .into_response()
        }
    }
}
