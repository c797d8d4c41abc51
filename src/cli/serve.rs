use crate::{error, server, spotify::SpotifyCatalog};

pub async fn serve() {
    let catalog = match SpotifyCatalog::from_env() {
        Ok(catalog) => catalog,
        Err(e) => error!("Cannot start the proxy without Spotify credentials. Err: {}", e),
    };

    if let Err(e) = server::start_api_server(catalog).await {
        error!("Server stopped. Err: {}", e);
    }
}
