//! Derived views over a collection snapshot.
//!
//! Everything here is a pure function of the records passed in: the album
//! list pipeline (filter by decade, sort, limit) and the statistics page.

use std::collections::BTreeMap;

use crate::{
    types::{AlbumRecord, DecadeFilter, MAX_RATING, SortKey, StatsSummary, YearRange},
    utils,
};

const TOP_ARTISTS: usize = 5;
const RECENT_ALBUMS: usize = 5;

/// Sorts a copy of `records` by `key`.
///
/// Date added, rating and year sort newest/highest first; artist and name
/// sort A-Z. The sort is stable, equal keys keep their input order.
pub fn sort_by(records: &[AlbumRecord], key: SortKey) -> Vec<AlbumRecord> {
    let mut sorted = records.to_vec();
    match key {
        SortKey::DateAdded => sorted.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
        SortKey::Rating => sorted.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortKey::Year => sorted.sort_by(|a, b| b.year.cmp(&a.year)),
        SortKey::Artist => sorted.sort_by(|a, b| utils::locale_cmp(&a.artist, &b.artist)),
        SortKey::Name => sorted.sort_by(|a, b| utils::locale_cmp(&a.name, &b.name)),
    }
    sorted
}

pub fn filter_by_decade(records: &[AlbumRecord], filter: DecadeFilter) -> Vec<AlbumRecord> {
    match filter {
        DecadeFilter::All => records.to_vec(),
        DecadeFilter::Decade(decade) => records
            .iter()
            .filter(|r| r.decade() == decade)
            .cloned()
            .collect(),
    }
}

/// The first `limit` records, or all of them without a limit.
pub fn paginate_limit(records: &[AlbumRecord], limit: Option<usize>) -> Vec<AlbumRecord> {
    match limit {
        Some(n) => records.iter().take(n).cloned().collect(),
        None => records.to_vec(),
    }
}

/// Decades present in the collection, newest first.
pub fn available_decades(records: &[AlbumRecord]) -> Vec<i32> {
    let mut decades: Vec<i32> = records.iter().map(AlbumRecord::decade).collect();
    decades.sort_unstable_by(|a, b| b.cmp(a));
    decades.dedup();
    decades
}

/// The album list: filter by decade, then sort, then limit.
pub fn sorted_and_filtered(
    records: &[AlbumRecord],
    key: SortKey,
    filter: DecadeFilter,
    limit: Option<usize>,
) -> Vec<AlbumRecord> {
    let filtered = filter_by_decade(records, filter);
    let sorted = sort_by(&filtered, key);
    paginate_limit(&sorted, limit)
}

pub fn compute_stats(records: &[AlbumRecord]) -> StatsSummary {
    let decade_counts = decade_counts(records);
    let top_decade = decade_counts
        .iter()
        .fold(None, |best: Option<(i32, usize)>, &(decade, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((decade, count)),
        });

    let all_artist_counts = artist_counts(records);
    let top_artist = all_artist_counts.first().cloned();
    let artist_counts = all_artist_counts.into_iter().take(TOP_ARTISTS).collect();

    let rated: Vec<&AlbumRecord> = records.iter().filter(|r| r.is_rated()).collect();
    let average_rating = if rated.is_empty() {
        0.0
    } else {
        let sum: u32 = rated.iter().map(|r| u32::from(r.rating)).sum();
        round_to_tenth(f64::from(sum) / rated.len() as f64)
    };

    let year_range = records
        .iter()
        .map(|r| r.year)
        .min()
        .zip(records.iter().map(|r| r.year).max())
        .map(|(first, last)| YearRange { first, last });

    StatsSummary {
        total_albums: records.len(),
        decade_counts,
        top_decade,
        artist_counts,
        top_artist,
        average_rating,
        rated_count: rated.len(),
        five_star_count: records.iter().filter(|r| r.rating == MAX_RATING).count(),
        top_rated_by_decade: top_rated_by_decade(records),
        recent_albums: paginate_limit(&sort_by(records, SortKey::DateAdded), Some(RECENT_ALBUMS)),
        year_range,
    }
}

fn decade_counts(records: &[AlbumRecord]) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.decade()).or_default() += 1;
    }
    counts.into_iter().rev().collect()
}

/// Album count per artist, most collected first. Artists with equal counts
/// keep the order in which they first appear in `records`.
fn artist_counts(records: &[AlbumRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(artist, _)| *artist == record.artist) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.artist.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn top_rated_by_decade(records: &[AlbumRecord]) -> Vec<(i32, AlbumRecord)> {
    let mut best: BTreeMap<i32, &AlbumRecord> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_rated()) {
        let current = best.entry(record.decade()).or_insert(record);
        if record.rating > current.rating {
            *current = record;
        }
    }
    best.into_iter()
        .rev()
        .map(|(decade, record)| (decade, record.clone()))
        .collect()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
