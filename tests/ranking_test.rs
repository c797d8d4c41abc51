use chrono::{TimeZone, Utc};
use discodiary::management::ranking::*;
use discodiary::management::{CollectionStore, MemoryStorage};
use discodiary::types::{AlbumRecord, ArtistRank, Direction, RankingScope};

// Helper function to create a test album
fn create_test_album(id: &str, artist: &str, rank: u32) -> AlbumRecord {
    AlbumRecord {
        id: id.to_string(),
        name: format!("Album {}", id),
        artist: artist.to_string(),
        artist_id: None,
        release_date: None,
        year: 2000,
        image: None,
        spotify_url: None,
        genres: Vec::new(),
        total_tracks: 10,
        rating: 0,
        notes: String::new(),
        added_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        rank,
        artist_ranks: Default::default(),
    }
}

fn sample_collection() -> Vec<AlbumRecord> {
    vec![
        create_test_album("a1", "The Beatles", 1),
        create_test_album("a2", "Beyoncé", 2),
        create_test_album("a3", "The Beatles", 3),
        create_test_album("a4", "Radiohead", 4),
        create_test_album("a5", "Radiohead", 5),
    ]
}

fn ids(records: &[AlbumRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

async fn seeded_store() -> CollectionStore<MemoryStorage> {
    let store = CollectionStore::new(MemoryStorage::new());
    store.save(&sample_collection()).await.unwrap();
    store
}

#[test]
fn test_reorder_by_position() {
    let mut items = vec!["a", "b", "c", "d"];
    assert!(reorder_by_position(&mut items, 0, 2));
    assert_eq!(items, vec!["b", "c", "a", "d"]);

    let mut items = vec!["a", "b", "c", "d"];
    assert!(reorder_by_position(&mut items, 3, 0));
    assert_eq!(items, vec!["d", "a", "b", "c"]);
}

#[test]
fn test_reorder_by_position_is_a_permutation() {
    let original: Vec<u32> = (1..=8).collect();

    for from in 0..original.len() {
        for to in 0..original.len() {
            let mut items = original.clone();
            reorder_by_position(&mut items, from, to);

            assert_eq!(items.len(), original.len());
            assert_eq!(items[to], original[from]);

            let mut sorted = items.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, original);
        }
    }
}

#[test]
fn test_reorder_by_position_rejects_invalid_moves() {
    let mut items = vec!["a", "b", "c"];

    assert!(!reorder_by_position(&mut items, 1, 1));
    assert!(!reorder_by_position(&mut items, 3, 0));
    assert!(!reorder_by_position(&mut items, 0, 3));
    assert_eq!(items, vec!["a", "b", "c"]);

    let mut empty: Vec<&str> = Vec::new();
    assert!(!reorder_by_position(&mut empty, 0, 0));
}

#[test]
fn test_move_by_at_the_edges_is_a_no_op() {
    let mut items = vec!["a", "b", "c"];

    assert!(!move_by(&mut items, 0, Direction::Up));
    assert!(!move_by(&mut items, 2, Direction::Down));
    assert_eq!(items, vec!["a", "b", "c"]);

    assert!(move_by(&mut items, 0, Direction::Down));
    assert_eq!(items, vec!["b", "a", "c"]);

    assert!(move_by(&mut items, 2, Direction::Up));
    assert_eq!(items, vec!["b", "c", "a"]);
}

#[test]
fn test_global_order_ignores_gaps() {
    let records = vec![
        create_test_album("x", "A", 7),
        create_test_album("y", "A", 1),
        create_test_album("z", "A", 3),
    ];

    assert_eq!(ids(&global_order(&records)), vec!["y", "z", "x"]);
}

#[test]
fn test_global_position_hides_gaps() {
    let records = vec![
        create_test_album("x", "A", 7),
        create_test_album("y", "A", 1),
        create_test_album("z", "A", 3),
    ];

    assert_eq!(global_position(&records, "y"), Some(1));
    assert_eq!(global_position(&records, "z"), Some(2));
    assert_eq!(global_position(&records, "x"), Some(3));
    assert_eq!(global_position(&records, "missing"), None);
}

#[test]
fn test_commit_global_assigns_dense_ranks() {
    let records = sample_collection();
    let mut ordered = global_order(&records);
    ordered.reverse();

    let committed = commit_global(&records, &ordered);
    assert_eq!(ids(&committed), vec!["a5", "a4", "a3", "a2", "a1"]);

    let ranks: Vec<u32> = committed.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_commit_global_closes_gaps_and_keeps_missing_records() {
    let records = vec![
        create_test_album("x", "A", 2),
        create_test_album("y", "A", 9),
        create_test_album("z", "A", 5),
    ];

    // Only one record in the requested order, the rest follow by rank
    let committed = commit_global(&records, &[records[1].clone()]);
    let ranks: Vec<(&str, u32)> = committed.iter().map(|r| (r.id.as_str(), r.rank)).collect();
    assert_eq!(ranks, vec![("y", 1), ("x", 2), ("z", 3)]);
}

#[test]
fn test_commit_global_takes_fields_from_records() {
    let mut records = sample_collection();
    let ordered = global_order(&records);

    // A rating saved after the order was read is not lost by the commit
    records[0].rating = 5;

    let committed = commit_global(&records, &ordered);
    let a1 = committed.iter().find(|r| r.id == "a1").unwrap();
    assert_eq!(a1.rating, 5);
}

#[test]
fn test_artist_order_puts_unranked_last() {
    let mut records = sample_collection();
    assert_eq!(ids(&artist_order(&records, "Radiohead")), vec!["a4", "a5"]);

    records[4].set_artist_rank("Radiohead", 1);
    assert_eq!(ids(&artist_order(&records, "Radiohead")), vec!["a5", "a4"]);

    assert_eq!(records[3].artist_rank("Radiohead"), ArtistRank::Unranked);
    assert!(ArtistRank::Ranked(u32::MAX) < ArtistRank::Unranked);
}

#[test]
fn test_commit_artist_leaves_other_rankings_alone() {
    let mut records = sample_collection();
    records[1].set_artist_rank("Beyoncé", 1);
    let before = records.clone();

    let mut ordered = artist_order(&records, "The Beatles");
    ordered.reverse();
    commit_artist(&mut records, "The Beatles", &ordered);

    assert_eq!(records[2].artist_rank("The Beatles"), ArtistRank::Ranked(1));
    assert_eq!(records[0].artist_rank("The Beatles"), ArtistRank::Ranked(2));

    // Global ranks are unchanged
    let ranks: Vec<u32> = records.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);

    // Other artists are unchanged
    assert_eq!(records[1], before[1]);
    assert_eq!(records[3], before[3]);
    assert_eq!(records[4], before[4]);
}

#[test]
fn test_commit_artist_ignores_foreign_albums() {
    let mut records = sample_collection();
    let ordered = vec![records[3].clone(), records[0].clone()];

    commit_artist(&mut records, "The Beatles", &ordered);

    assert_eq!(records[0].artist_rank("The Beatles"), ArtistRank::Ranked(1));
    assert!(records[3].artist_ranks.is_empty());
}

#[test]
fn test_artists_and_counts() {
    let records = sample_collection();

    assert_eq!(artists(&records), vec!["Beyoncé", "Radiohead", "The Beatles"]);
    assert_eq!(
        artist_album_counts(&records),
        vec![
            ("Beyoncé".to_string(), 1),
            ("Radiohead".to_string(), 2),
            ("The Beatles".to_string(), 2),
        ]
    );
}

#[test]
fn test_default_artist() {
    // First alphabetical artist with more than one album
    assert_eq!(
        default_artist(&sample_collection()),
        Some("Radiohead".to_string())
    );

    // Otherwise the first artist at all
    let singles = vec![
        create_test_album("s1", "Portishead", 1),
        create_test_album("s2", "Massive Attack", 2),
    ];
    assert_eq!(default_artist(&singles), Some("Massive Attack".to_string()));

    assert_eq!(default_artist(&[]), None);
}

#[test]
fn test_default_artist_ignores_accents() {
    let records = vec![
        create_test_album("z1", "Zz Top", 1),
        create_test_album("z2", "Zz Top", 2),
        create_test_album("e1", "Émilie Simon", 3),
        create_test_album("e2", "Émilie Simon", 4),
    ];

    assert_eq!(artists(&records), vec!["Émilie Simon", "Zz Top"]);
    assert_eq!(default_artist(&records), Some("Émilie Simon".to_string()));
}

#[tokio::test]
async fn test_engine_rejected_move_does_not_write() {
    let store = seeded_store().await;
    let engine = RankingEngine::new(&store);
    let before = store.storage().contents();

    let result = engine
        .move_album(&RankingScope::Global, 0, Direction::Up)
        .await
        .unwrap();
    assert!(result.is_none());

    let result = engine
        .reorder(&RankingScope::Global, 0, 10)
        .await
        .unwrap();
    assert!(result.is_none());

    assert_eq!(store.storage().contents(), before);
}

#[tokio::test]
async fn test_engine_global_move_persists() {
    let store = seeded_store().await;
    let engine = RankingEngine::new(&store);

    let order = engine
        .move_album(&RankingScope::Global, 0, Direction::Down)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ids(&order), vec!["a2", "a1", "a3", "a4", "a5"]);

    let reloaded = engine.order(&RankingScope::Global).await;
    assert_eq!(ids(&reloaded), vec!["a2", "a1", "a3", "a4", "a5"]);
    assert_eq!(store.get("a2").await.map(|r| r.rank), Some(1));
    assert_eq!(store.get("a1").await.map(|r| r.rank), Some(2));
}

#[tokio::test]
async fn test_engine_artist_reorder_keeps_global_ranks() {
    let store = seeded_store().await;
    let engine = RankingEngine::new(&store);
    let scope = RankingScope::Artist("The Beatles".to_string());

    let order = engine.reorder(&scope, 0, 1).await.unwrap().unwrap();
    assert_eq!(ids(&order), vec!["a3", "a1"]);

    let records = store.load().await;
    let ranks: Vec<u32> = records.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    assert_eq!(ids(&engine.order(&scope).await), vec!["a3", "a1"]);
    let global = engine.order(&RankingScope::Global).await;
    assert_eq!(ids(&global), vec!["a1", "a2", "a3", "a4", "a5"]);
}

#[tokio::test]
async fn test_engine_commit_after_removal_is_dense() {
    let store = seeded_store().await;
    store.remove("a3").await.unwrap();

    let engine = RankingEngine::new(&store);
    let order = engine
        .move_album(&RankingScope::Global, 3, Direction::Up)
        .await
        .unwrap()
        .unwrap();

    let ranks: Vec<(&str, u32)> = order.iter().map(|r| (r.id.as_str(), r.rank)).collect();
    assert_eq!(ranks, vec![("a1", 1), ("a2", 2), ("a5", 3), ("a4", 4)]);
}
