use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    api::{catalog_failure, error_body},
    spotify::SpotifyCatalog,
    warning,
};

pub async fn album(
    Path(id): Path<String>,
    Extension(catalog): Extension<SpotifyCatalog>,
) -> Response {
    if id.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(error_body("Missing album ID", None, None)),
        )
            .into_response();
    }

    match catalog.album_json(&id).await {
        Ok(json) => Json(json).into_response(),
        Err(e) => {
            warning!("Album details endpoint error: {}", e);
            catalog_failure(&e, "Failed to fetch album details").into_response()
        }
    }
}
