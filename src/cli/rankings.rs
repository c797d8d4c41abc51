use tabled::Table;

use crate::{
    error, info,
    management::{
        CollectionStore, RankingEngine,
        ranking::{self, artist_album_counts},
    },
    success,
    types::{AlbumRecord, ArtistTableRow, Direction, RankingScope, RankingTableRow},
    utils, warning,
};

#[derive(Clone, Copy)]
enum Action {
    Show,
    Move { from: usize, to: usize },
    Step { index: usize, direction: Direction },
}

/// Shows a ranking and optionally reorders it first.
///
/// `artist` selects the per-artist ranking; an empty name picks the default
/// artist. Positions are 1-based.
pub async fn rankings(
    artist: Option<String>,
    move_positions: Option<Vec<usize>>,
    up: Option<usize>,
    down: Option<usize>,
) {
    let store = CollectionStore::open_default();
    let records = store.load().await;

    if records.is_empty() {
        info!("No albums to rank yet!");
        info!("Add some albums to your collection first, then come back to rank them.");
        return;
    }

    let scope = match artist {
        None => RankingScope::Global,
        Some(name) if name.trim().is_empty() => match ranking::default_artist(&records) {
            Some(default) => RankingScope::Artist(default),
            None => RankingScope::Global,
        },
        Some(name) => RankingScope::Artist(name),
    };

    if let RankingScope::Artist(name) = &scope {
        if !records.iter().any(|r| r.artist == *name) {
            warning!("{} has no albums in your collection.", name);
            return;
        }
    }

    let action = match parse_action(move_positions, up, down) {
        Ok(action) => action,
        Err(message) => {
            warning!("{}", message);
            Action::Show
        }
    };

    let engine = RankingEngine::new(&store);
    let result = match action {
        Action::Show => Ok(None),
        Action::Move { from, to } => engine.reorder(&scope, from, to).await,
        Action::Step { index, direction } => engine.move_album(&scope, index, direction).await,
    };

    let order = match result {
        Ok(Some(order)) => {
            success!("Rankings saved.");
            order
        }
        Ok(None) => {
            if !matches!(action, Action::Show) {
                warning!("Nothing moved: position out of range.");
            }
            engine.order(&scope).await
        }
        Err(e) => error!("Failed to save rankings. Err: {}", e),
    };

    match &scope {
        RankingScope::Global => info!("Your Top Albums of All Time"),
        RankingScope::Artist(name) => info!("Albums by {} ({})", name, order.len()),
    }
    println!("{}", Table::new(ranking_rows(&order)));
    info!("Reorder with --move <from> <to>, --up <n> or --down <n>");
}

/// Artists in the collection with their album counts.
pub async fn artists() {
    let store = CollectionStore::open_default();
    let records = store.load().await;

    if records.is_empty() {
        info!("No artists found! Add albums from your favorite artists first.");
        return;
    }

    let rows: Vec<ArtistTableRow> = artist_album_counts(&records)
        .into_iter()
        .map(|(artist, albums)| ArtistTableRow { artist, albums })
        .collect();
    println!("{}", Table::new(rows));

    if let Some(default) = ranking::default_artist(&records) {
        info!("Default artist for rankings: {}", default);
    }
}

fn parse_action(
    move_positions: Option<Vec<usize>>,
    up: Option<usize>,
    down: Option<usize>,
) -> Result<Action, String> {
    if let Some(positions) = move_positions {
        let [from, to] = positions[..] else {
            return Err("--move expects exactly two positions".to_string());
        };
        return Ok(Action::Move {
            from: to_index(from)?,
            to: to_index(to)?,
        });
    }

    if let Some(position) = up {
        return Ok(Action::Step {
            index: to_index(position)?,
            direction: Direction::Up,
        });
    }

    if let Some(position) = down {
        return Ok(Action::Step {
            index: to_index(position)?,
            direction: Direction::Down,
        });
    }

    Ok(Action::Show)
}

fn to_index(position: usize) -> Result<usize, String> {
    position
        .checked_sub(1)
        .ok_or_else(|| "Positions start at 1.".to_string())
}

fn ranking_rows(order: &[AlbumRecord]) -> Vec<RankingTableRow> {
    order
        .iter()
        .enumerate()
        .map(|(i, a)| RankingTableRow {
            position: i + 1,
            name: a.name.clone(),
            artist: a.artist.clone(),
            year: a.year,
            rating: utils::stars(a.rating),
        })
        .collect()
}
