use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr};

use crate::{Res, api, config, spotify::SpotifyCatalog, success};

pub fn router(catalog: SpotifyCatalog) -> Router {
    Router::new()
        .route("/", get(api::health))
        .route("/api/getAccessToken", get(api::access_token))
        .route("/api/search", get(api::search))
        .route("/api/album/{id}", get(api::album))
        .layer(Extension(catalog))
}

pub async fn start_api_server(catalog: SpotifyCatalog) -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    success!("Server running on http://{}", addr);
    axum::serve(listener, router(catalog)).await?;
    Ok(())
}
