use tabled::Table;

use crate::{
    error, info,
    management::{CollectionStore, ranking},
    success,
    types::{AlbumRecord, AlbumTableRow, DecadeFilter, SortKey},
    utils, views, warning,
};

pub async fn list_albums(sort: SortKey, decade: DecadeFilter, limit: Option<usize>) {
    let store = CollectionStore::open_default();
    let records = store.load().await;

    if records.is_empty() {
        info!("No albums in your collection yet!");
        info!("Start by searching for albums: discodiary search <query>");
        return;
    }

    let shown = views::sorted_and_filtered(&records, sort, decade, limit);
    let rows: Vec<AlbumTableRow> = shown
        .iter()
        .map(|a| AlbumTableRow {
            name: a.name.clone(),
            artist: a.artist.clone(),
            year: a.year,
            rating: utils::stars(a.rating),
            added: utils::format_added(&a.added_at),
            id: a.id.clone(),
        })
        .collect();

    println!("{}", Table::new(rows));
    info!("Showing {} of {} albums", shown.len(), records.len());

    let decades: Vec<String> = views::available_decades(&records)
        .into_iter()
        .map(|d| format!("{}s", d))
        .collect();
    info!("Decades: {}", decades.join(", "));
}

pub async fn show_album(id: String) {
    let store = CollectionStore::open_default();
    let records = store.load().await;
    let (Some(record), Some(position)) = (
        records.iter().find(|r| r.id == id),
        ranking::global_position(&records, &id),
    ) else {
        error!("Album {} is not in your collection.", id);
    };

    info!("{} - {} ({})", record.name, record.artist, record.year);
    info!("Rank: #{} of {}", position, records.len());
    info!(
        "Rating: {}",
        if record.is_rated() {
            utils::stars(record.rating)
        } else {
            "unrated".to_string()
        }
    );
    info!("Tracks: {}", record.total_tracks);
    if !record.genres.is_empty() {
        info!("Genres: {}", record.genres.join(", "));
    }
    info!("Added: {}", utils::format_added(&record.added_at));
    info!(
        "Notes: {}",
        if record.notes.is_empty() {
            "No notes yet. Add some with: discodiary notes <id> <text>"
        } else {
            record.notes.as_str()
        }
    );
    if let Some(url) = &record.spotify_url {
        info!("Spotify: {}", url);
    }
}

pub async fn rate(id: String, rating: u8) {
    let store = CollectionStore::open_default();
    match store.update_rating(&id, rating).await {
        Ok(record) if record.is_rated() => success!(
            "Rated \"{}\" {}",
            record.name,
            utils::stars(record.rating)
        ),
        Ok(record) => success!("\"{}\" is now unrated.", record.name),
        Err(e) => error!("Failed to rate album. Err: {}", e),
    }
}

pub async fn notes(id: String, notes: String) {
    let store = CollectionStore::open_default();
    match store.update_notes(&id, &notes).await {
        Ok(record) if record.notes.is_empty() => {
            success!("Cleared notes of \"{}\".", record.name)
        }
        Ok(record) => success!("Saved notes for \"{}\".", record.name),
        Err(e) => error!("Failed to save notes. Err: {}", e),
    }
}

/// Deletes an album. Without `yes`, the user has to confirm first.
pub async fn remove(id: String, yes: bool) {
    let record = find_or_exit(&id).await;

    if !yes && !utils::confirm(&format!("Remove \"{}\" from your collection?", record.name)) {
        info!("Kept \"{}\".", record.name);
        return;
    }

    let store = CollectionStore::open_default();
    match store.remove(&record.id).await {
        Ok(true) => success!("Removed \"{}\" from your collection.", record.name),
        Ok(false) => warning!("Album {} is not in your collection.", record.id),
        Err(e) => error!("Failed to remove album. Err: {}", e),
    }
}

pub async fn open(id: String) {
    let record = find_or_exit(&id).await;

    let Some(url) = record.spotify_url else {
        warning!("\"{}\" has no Spotify link.", record.name);
        return;
    };

    if webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    }
}

async fn find_or_exit(id: &str) -> AlbumRecord {
    let store = CollectionStore::open_default();
    match store.get(id).await {
        Some(record) => record,
        None => error!("Album {} is not in your collection.", id),
    }
}
