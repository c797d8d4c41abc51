use tabled::Table;

use crate::{
    info,
    management::CollectionStore,
    types::{ArtistTableRow, DecadeTableRow},
    utils, views,
};

pub async fn stats() {
    let store = CollectionStore::open_default();
    let records = store.load().await;

    if records.is_empty() {
        info!("No stats available yet!");
        info!("Add albums to your collection to see your music statistics.");
        return;
    }

    let stats = views::compute_stats(&records);

    info!("Albums in collection: {}", stats.total_albums);
    info!(
        "Average rating: {:.1} ★ ({} albums rated)",
        stats.average_rating, stats.rated_count
    );
    info!("Five-star albums: {}", stats.five_star_count);
    info!(
        "Year range: {}",
        stats
            .year_range
            .map_or_else(|| "N/A".to_string(), |range| range.to_string())
    );

    let decade_rows: Vec<DecadeTableRow> = stats
        .decade_counts
        .iter()
        .map(|(decade, count)| DecadeTableRow {
            decade: format!("{}s", decade),
            albums: *count,
            share: format!(
                "{:.0}%",
                *count as f64 / stats.total_albums as f64 * 100.0
            ),
        })
        .collect();
    println!("\nAlbums by Decade\n{}", Table::new(decade_rows));
    if let Some((decade, count)) = stats.top_decade {
        info!("Most albums from the {}s ({} albums)", decade, count);
    }

    let artist_rows: Vec<ArtistTableRow> = stats
        .artist_counts
        .iter()
        .map(|(artist, albums)| ArtistTableRow {
            artist: artist.clone(),
            albums: *albums,
        })
        .collect();
    println!("\nTop Artists\n{}", Table::new(artist_rows));
    if let Some((artist, count)) = &stats.top_artist {
        info!("Most collected artist: {} ({} albums)", artist, count);
    }

    if !stats.top_rated_by_decade.is_empty() {
        println!("\nBest Rated per Decade");
        for (decade, album) in &stats.top_rated_by_decade {
            info!(
                "{}s: {} - {} {}",
                decade,
                album.name,
                album.artist,
                utils::stars(album.rating)
            );
        }
    }

    println!("\nRecently Added");
    for album in &stats.recent_albums {
        info!(
            "{} - {} ({})",
            album.name,
            album.artist,
            utils::format_added(&album.added_at)
        );
    }
}
