use axum::response::Json;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Discography Diary API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "search": "/api/search?q=album_name&type=album",
            "album": "/api/album/:id"
        }
    }))
}
