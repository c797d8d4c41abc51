use chrono::Utc;
use tabled::Table;

use crate::{
    cli::spinner,
    error, info,
    management::{CollectionError, CollectionStore},
    spotify::{Catalog, CatalogBackend, DEFAULT_SEARCH_TYPE},
    success,
    types::{CatalogAlbum, SearchTableRow},
    utils, warning,
};

pub async fn search(query: String, limit: u32, add: Option<usize>) {
    let catalog = load_catalog();

    let pb = spinner(format!("Searching for \"{}\"...", query.trim()));
    let result = catalog.search(&query, DEFAULT_SEARCH_TYPE, limit).await;
    pb.finish_and_clear();

    let result = match result {
        Ok(result) => result,
        Err(e) => error!("Failed to search. Please try again.\n Error: {}", e),
    };

    let albums = result.album_items();
    if albums.is_empty() {
        warning!("No albums found. Try a different search term.");
        return;
    }

    if let Some(position) = add {
        match position.checked_sub(1).and_then(|i| albums.get(i)) {
            Some(album) => add_catalog_album(album).await,
            None => warning!(
                "There is no result #{}. Pick a number between 1 and {}.",
                position,
                albums.len()
            ),
        }
        return;
    }

    let rows: Vec<SearchTableRow> = albums
        .iter()
        .enumerate()
        .map(|(i, a)| SearchTableRow {
            index: i + 1,
            name: a.name.clone(),
            artists: a
                .artists
                .iter()
                .map(|artist| artist.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            year: utils::year_from_release_date(&a.release_date),
            id: a.id.clone(),
        })
        .collect();

    info!("Search Results ({})", rows.len());
    println!("{}", Table::new(rows));
    info!("Add an album with: discodiary add <id>");
}

pub async fn add(id: String) {
    let catalog = load_catalog();

    let pb = spinner(format!("Fetching album {}...", id.trim()));
    let album = catalog.get_album(&id).await;
    pb.finish_and_clear();

    match album {
        Ok(album) => add_catalog_album(&album).await,
        Err(e) => error!("Failed to fetch album details.\n Error: {}", e),
    }
}

async fn add_catalog_album(album: &CatalogAlbum) {
    let store = CollectionStore::open_default();
    match store.add_from_catalog(album, Utc::now()).await {
        Ok(record) => success!(
            "\"{}\" added to your collection! (rank #{})",
            record.name,
            record.rank
        ),
        Err(CollectionError::AlreadyInCollection(_)) => {
            warning!("This album is already in your collection!")
        }
        Err(e) => error!("Failed to save album. Err: {}", e),
    }
}

fn load_catalog() -> CatalogBackend {
    match CatalogBackend::from_env() {
        Ok(catalog) => catalog,
        Err(e) => error!(
            "No catalog available. Set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET, \
             or DISCODIARY_API_URL.\n Error: {}",
            e
        ),
    }
}
