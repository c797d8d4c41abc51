use chrono::{TimeZone, Utc};
use discodiary::types::{AlbumRecord, DecadeFilter, SortKey, YearRange};
use discodiary::views::*;

// Helper function to create a test album
fn create_test_album(
    id: &str,
    name: &str,
    artist: &str,
    year: i32,
    rating: u8,
    added_day: u32,
) -> AlbumRecord {
    AlbumRecord {
        id: id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
        artist_id: None,
        release_date: None,
        year,
        image: None,
        spotify_url: None,
        genres: Vec::new(),
        total_tracks: 10,
        rating,
        notes: String::new(),
        added_at: Utc.with_ymd_and_hms(2024, 1, added_day, 12, 0, 0).unwrap(),
        rank: 0,
        artist_ranks: Default::default(),
    }
}

fn sample_collection() -> Vec<AlbumRecord> {
    vec![
        create_test_album("a1", "Abbey Road", "The Beatles", 1969, 5, 1),
        create_test_album("a2", "Lemonade", "Beyoncé", 2016, 4, 3),
        create_test_album("a3", "Revolver", "The Beatles", 1966, 0, 2),
        create_test_album("a4", "OK Computer", "Radiohead", 1997, 5, 5),
        create_test_album("a5", "Kid A", "Radiohead", 2000, 3, 4),
    ]
}

fn ids(records: &[AlbumRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_sort_by_date_added_newest_first() {
    let sorted = sort_by(&sample_collection(), SortKey::DateAdded);
    assert_eq!(ids(&sorted), vec!["a4", "a5", "a2", "a3", "a1"]);
}

#[test]
fn test_sort_by_rating_is_stable() {
    let sorted = sort_by(&sample_collection(), SortKey::Rating);

    // a1 and a4 are both five stars and keep their input order
    assert_eq!(ids(&sorted), vec!["a1", "a4", "a2", "a5", "a3"]);
}

#[test]
fn test_sort_by_year_newest_first() {
    let sorted = sort_by(&sample_collection(), SortKey::Year);
    assert_eq!(ids(&sorted), vec!["a2", "a5", "a4", "a1", "a3"]);
}

#[test]
fn test_sort_by_artist_and_name_ascending() {
    let by_artist = sort_by(&sample_collection(), SortKey::Artist);
    assert_eq!(ids(&by_artist), vec!["a2", "a4", "a5", "a1", "a3"]);

    let by_name = sort_by(&sample_collection(), SortKey::Name);
    assert_eq!(ids(&by_name), vec!["a1", "a5", "a2", "a4", "a3"]);
}

#[test]
fn test_sort_by_name_ignores_case() {
    let records = vec![
        create_test_album("x", "blue", "Joni Mitchell", 1971, 0, 1),
        create_test_album("y", "Abbey Road", "The Beatles", 1969, 0, 2),
        create_test_album("z", "Court and Spark", "Joni Mitchell", 1974, 0, 3),
    ];

    let sorted = sort_by(&records, SortKey::Name);
    assert_eq!(ids(&sorted), vec!["y", "x", "z"]);
}

#[test]
fn test_sort_by_artist_ignores_accents() {
    let records = vec![
        create_test_album("z", "Tres Hombres", "Zz Top", 1973, 0, 1),
        create_test_album("e", "Rocket", "Émilie Simon", 2004, 0, 2),
        create_test_album("b", "Parklife", "Blur", 1994, 0, 3),
        create_test_album("k", "Debut", "Björk", 1993, 0, 4),
    ];

    let sorted = sort_by(&records, SortKey::Artist);
    assert_eq!(ids(&sorted), vec!["k", "b", "e", "z"]);
}

#[test]
fn test_filter_by_decade_all_keeps_everything_in_order() {
    let records = sample_collection();
    let filtered = filter_by_decade(&records, DecadeFilter::All);
    assert_eq!(filtered, records);
}

#[test]
fn test_filter_by_decade_selects_bucket() {
    let records = sample_collection();

    let sixties = filter_by_decade(&records, DecadeFilter::Decade(1960));
    assert_eq!(ids(&sixties), vec!["a1", "a3"]);

    let nineties = filter_by_decade(&records, DecadeFilter::Decade(1990));
    assert_eq!(ids(&nineties), vec!["a4"]);

    let eighties = filter_by_decade(&records, DecadeFilter::Decade(1980));
    assert!(eighties.is_empty());
}

#[test]
fn test_paginate_limit() {
    let records = sample_collection();

    assert_eq!(paginate_limit(&records, None).len(), 5);
    assert_eq!(ids(&paginate_limit(&records, Some(2))), vec!["a1", "a2"]);

    // Limit larger than the collection returns everything
    assert_eq!(paginate_limit(&records, Some(50)).len(), 5);
    assert!(paginate_limit(&records, Some(0)).is_empty());
}

#[test]
fn test_available_decades_newest_first() {
    assert_eq!(
        available_decades(&sample_collection()),
        vec![2010, 2000, 1990, 1960]
    );
    assert!(available_decades(&[]).is_empty());
}

#[test]
fn test_sorted_and_filtered_pipeline() {
    let shown = sorted_and_filtered(
        &sample_collection(),
        SortKey::Year,
        DecadeFilter::Decade(1960),
        Some(1),
    );
    assert_eq!(ids(&shown), vec!["a1"]);
}

#[test]
fn test_compute_stats_on_sample_collection() {
    let stats = compute_stats(&sample_collection());

    assert_eq!(stats.total_albums, 5);
    assert_eq!(
        stats.decade_counts,
        vec![(2010, 1), (2000, 1), (1990, 1), (1960, 2)]
    );
    assert_eq!(stats.top_decade, Some((1960, 2)));

    // Equal counts keep the order of first appearance
    assert_eq!(
        stats.artist_counts,
        vec![
            ("The Beatles".to_string(), 2),
            ("Radiohead".to_string(), 2),
            ("Beyoncé".to_string(), 1),
        ]
    );
    assert_eq!(stats.top_artist, Some(("The Beatles".to_string(), 2)));

    // (5 + 4 + 5 + 3) / 4 = 4.25
    assert_eq!(stats.average_rating, 4.3);
    assert_eq!(stats.rated_count, 4);
    assert_eq!(stats.five_star_count, 2);

    let best: Vec<(i32, &str)> = stats
        .top_rated_by_decade
        .iter()
        .map(|(decade, album)| (*decade, album.id.as_str()))
        .collect();
    assert_eq!(best, vec![(2010, "a2"), (2000, "a5"), (1990, "a4"), (1960, "a1")]);

    assert_eq!(ids(&stats.recent_albums), vec!["a4", "a5", "a2", "a3", "a1"]);
    assert_eq!(
        stats.year_range,
        Some(YearRange {
            first: 1966,
            last: 2016
        })
    );
}

#[test]
fn test_compute_stats_average_ignores_unrated() {
    let records = vec![
        create_test_album("r1", "One", "A", 1990, 0, 1),
        create_test_album("r2", "Two", "A", 1990, 0, 2),
        create_test_album("r3", "Three", "B", 1991, 4, 3),
        create_test_album("r4", "Four", "C", 1992, 5, 4),
    ];

    let stats = compute_stats(&records);
    assert_eq!(stats.average_rating, 4.5);
    assert_eq!(stats.rated_count, 2);
}

#[test]
fn test_compute_stats_tie_breaks() {
    let records = vec![
        create_test_album("t1", "Nineties", "A", 1995, 5, 1),
        create_test_album("t2", "Noughties", "B", 2005, 5, 2),
        create_test_album("t3", "Also Noughties", "B", 2006, 5, 3),
        create_test_album("t4", "Also Nineties", "C", 1999, 3, 4),
    ];

    let stats = compute_stats(&records);

    // Equal decade counts: the newer decade wins
    assert_eq!(stats.top_decade, Some((2000, 2)));

    // Equal best ratings in a decade: the first album encountered wins
    let best: Vec<(i32, &str)> = stats
        .top_rated_by_decade
        .iter()
        .map(|(decade, album)| (*decade, album.id.as_str()))
        .collect();
    assert_eq!(best, vec![(2000, "t2"), (1990, "t1")]);
}

#[test]
fn test_compute_stats_keeps_top_five_artists() {
    let records: Vec<AlbumRecord> = (1..=7)
        .map(|i| {
            let artist = format!("Artist {}", i);
            create_test_album(&format!("id{}", i), "Album", &artist, 2000, 0, i)
        })
        .collect();

    let stats = compute_stats(&records);
    assert_eq!(stats.artist_counts.len(), 5);
    assert_eq!(stats.top_artist, Some(("Artist 1".to_string(), 1)));
    assert_eq!(stats.recent_albums.len(), 5);
}

#[test]
fn test_compute_stats_empty_collection() {
    let stats = compute_stats(&[]);

    assert_eq!(stats.total_albums, 0);
    assert!(stats.decade_counts.is_empty());
    assert_eq!(stats.top_decade, None);
    assert_eq!(stats.top_artist, None);
    assert_eq!(stats.average_rating, 0.0);
    assert_eq!(stats.rated_count, 0);
    assert!(stats.recent_albums.is_empty());
    assert_eq!(stats.year_range, None);
}

#[test]
fn test_year_range_display() {
    let range = YearRange {
        first: 1966,
        last: 2016,
    };
    assert_eq!(range.to_string(), "1966 - 2016");
}
