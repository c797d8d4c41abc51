use axum::{
    Extension, Json,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    api::{catalog_failure, error_body},
    spotify::{DEFAULT_SEARCH_LIMIT, DEFAULT_SEARCH_TYPE, SpotifyCatalog},
    warning,
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<u32>,
}

pub async fn search(
    Query(params): Query<SearchParams>,
    Extension(catalog): Extension<SpotifyCatalog>,
) -> Response {
    let Some(query) = params.q.as_deref().filter(|q| !q.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(error_body(
                "Missing query parameter",
                Some("Please provide a search query (q)"),
                None,
            )),
        )
            .into_response();
    };

    let kind = params.kind.as_deref().unwrap_or(DEFAULT_SEARCH_TYPE);
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

    match catalog.search_json(query, kind, limit).await {
        Ok(json) => Json(json).into_response(),
        Err(e) => {
            warning!("Search endpoint error: {}", e);
            catalog_failure(&e, "Failed to search Spotify").into_response()
        }
    }
}
