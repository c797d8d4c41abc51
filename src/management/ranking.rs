//! Global and per-artist album rankings.
//!
//! Two ordering spaces share the same records. The global order lives in
//! each record's `rank`, an artist's order lives in `artistRanks[artist]` of
//! that artist's albums only. Reordering is a single-element move by
//! position; committing writes 1-based positions back into the store.

use std::collections::HashSet;

use crate::{
    management::{CollectionError, CollectionStore, Storage},
    types::{AlbumRecord, Direction, RankingScope},
    utils,
};

/// Moves the element at `from` so that it ends up at `to`.
///
/// Returns `false` and leaves `items` untouched when either index is out of
/// range or both are equal.
pub fn reorder_by_position<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() || from == to {
        return false;
    }

    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Moves the element at `index` one step up or down.
pub fn move_by<T>(items: &mut Vec<T>, index: usize, direction: Direction) -> bool {
    let target = match direction {
        Direction::Up => match index.checked_sub(1) {
            Some(target) => target,
            None => return false,
        },
        Direction::Down => index + 1,
    };

    reorder_by_position(items, index, target)
}

/// All records by ascending global rank. Gaps in `rank` are ignored.
pub fn global_order(records: &[AlbumRecord]) -> Vec<AlbumRecord> {
    let mut ordered = records.to_vec();
    ordered.sort_by_key(|r| r.rank);
    ordered
}

/// 1-based position of `id` in the global order, the number shown in the
/// ranking tables. Unlike the stored `rank` it never has gaps.
pub fn global_position(records: &[AlbumRecord], id: &str) -> Option<usize> {
    global_order(records)
        .iter()
        .position(|r| r.id == id)
        .map(|index| index + 1)
}

/// The albums of `artist`, ranked ones first, unranked ones last.
///
/// Ties (in particular among unranked albums) fall back to the global rank.
pub fn artist_order(records: &[AlbumRecord], artist: &str) -> Vec<AlbumRecord> {
    let mut ordered: Vec<AlbumRecord> = records
        .iter()
        .filter(|r| r.artist == artist)
        .cloned()
        .collect();
    ordered.sort_by(|a, b| {
        a.artist_rank(artist)
            .cmp(&b.artist_rank(artist))
            .then(a.rank.cmp(&b.rank))
    });
    ordered
}

/// Rewrites every global rank from the positions in `ordered`.
///
/// Field values are taken from `records`, `ordered` only contributes the
/// sequence of ids. Records missing from `ordered` keep their relative order
/// after the ordered ones, so the result is always ranked `1..=len`.
pub fn commit_global(records: &[AlbumRecord], ordered: &[AlbumRecord]) -> Vec<AlbumRecord> {
    let mut seen = HashSet::new();
    let mut committed: Vec<AlbumRecord> = ordered
        .iter()
        .filter_map(|o| records.iter().find(|r| r.id == o.id))
        .filter(|r| seen.insert(r.id.clone()))
        .cloned()
        .collect();

    committed.extend(
        global_order(records)
            .into_iter()
            .filter(|r| !seen.contains(&r.id)),
    );

    for (position, record) in committed.iter_mut().enumerate() {
        record.rank = position as u32 + 1;
    }

    committed
}

/// Rewrites `artistRanks[artist]` of the artist's albums from `ordered`.
///
/// Global ranks and other artists' entries are not touched.
pub fn commit_artist(records: &mut [AlbumRecord], artist: &str, ordered: &[AlbumRecord]) {
    let members = ordered.iter().filter(|o| o.artist == artist);
    for (position, member) in members.enumerate() {
        if let Some(record) = records
            .iter_mut()
            .find(|r| r.id == member.id && r.artist == artist)
        {
            record.set_artist_rank(artist, position as u32 + 1);
        }
    }
}

/// Distinct artist names, alphabetical.
pub fn artists(records: &[AlbumRecord]) -> Vec<String> {
    let mut names: Vec<String> = records
        .iter()
        .map(|r| r.artist.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    names.sort_by(|a, b| utils::locale_cmp(a, b));
    names
}

/// `(artist, album count)` pairs, alphabetical by artist.
pub fn artist_album_counts(records: &[AlbumRecord]) -> Vec<(String, usize)> {
    artists(records)
        .into_iter()
        .map(|artist| {
            let count = records.iter().filter(|r| r.artist == artist).count();
            (artist, count)
        })
        .collect()
}

/// The artist shown when the per-artist ranking opens without a choice:
/// the first artist (alphabetically) with more than one album, else the
/// first artist at all.
pub fn default_artist(records: &[AlbumRecord]) -> Option<String> {
    let counts = artist_album_counts(records);
    counts
        .iter()
        .find(|(_, count)| *count > 1)
        .or_else(|| counts.first())
        .map(|(artist, _)| artist.clone())
}

/// Ranking operations bound to a collection store.
///
/// The engine keeps no copy of the collection; every call starts from a
/// fresh load.
pub struct RankingEngine<'a, S> {
    store: &'a CollectionStore<S>,
}

impl<'a, S: Storage> RankingEngine<'a, S> {
    pub fn new(store: &'a CollectionStore<S>) -> Self {
        Self { store }
    }

    pub async fn order(&self, scope: &RankingScope) -> Vec<AlbumRecord> {
        let records = self.store.load().await;
        ordered_in(&records, scope)
    }

    /// Persists `ordered` as the order of `scope` and returns the new order.
    pub async fn commit(
        &self,
        scope: &RankingScope,
        ordered: &[AlbumRecord],
    ) -> Result<Vec<AlbumRecord>, CollectionError> {
        let mut records = self.store.load().await;
        match scope {
            RankingScope::Global => {
                records = commit_global(&records, ordered);
            }
            RankingScope::Artist(artist) => {
                commit_artist(&mut records, artist, ordered);
            }
        }

        self.store.save(&records).await?;
        Ok(ordered_in(&records, scope))
    }

    /// Moves the album at position `from` to position `to` (0-based) and
    /// commits. Returns `None` without writing when the move is rejected.
    pub async fn reorder(
        &self,
        scope: &RankingScope,
        from: usize,
        to: usize,
    ) -> Result<Option<Vec<AlbumRecord>>, CollectionError> {
        let mut ordered = self.order(scope).await;
        if !reorder_by_position(&mut ordered, from, to) {
            return Ok(None);
        }

        self.commit(scope, &ordered).await.map(Some)
    }

    /// Moves the album at `index` one step and commits, see [`Self::reorder`].
    pub async fn move_album(
        &self,
        scope: &RankingScope,
        index: usize,
        direction: Direction,
    ) -> Result<Option<Vec<AlbumRecord>>, CollectionError> {
        let mut ordered = self.order(scope).await;
        if !move_by(&mut ordered, index, direction) {
            return Ok(None);
        }

        self.commit(scope, &ordered).await.map(Some)
    }
}

fn ordered_in(records: &[AlbumRecord], scope: &RankingScope) -> Vec<AlbumRecord> {
    match scope {
        RankingScope::Global => global_order(records),
        RankingScope::Artist(artist) => artist_order(records, artist),
    }
}
