use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

pub const MAX_RATING: u8 = 5;
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// One saved album of the collection.
///
/// Field names are persisted in camelCase so the collection file keeps the
/// `myAlbums` layout: `{"id", "artistId", "addedAt", "artistRanks", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRecord {
    pub id: String,
    pub name: String,
    pub artist: String,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub spotify_url: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub total_tracks: u32,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub notes: String,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub rank: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub artist_ranks: BTreeMap<String, u32>,
}

impl AlbumRecord {
    /// Builds a fresh, unrated record from a catalog album.
    ///
    /// The year is derived once here from the release date and never
    /// recomputed afterwards.
    pub fn from_catalog(album: &CatalogAlbum, added_at: DateTime<Utc>, rank: u32) -> Self {
        let first_artist = album.artists.first();
        Self {
            id: album.id.clone(),
            name: album.name.clone(),
            artist: first_artist
                .map(|a| a.name.clone())
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            artist_id: first_artist.and_then(|a| a.id.clone()),
            release_date: Some(album.release_date.clone()).filter(|d| !d.is_empty()),
            year: utils::year_from_release_date(&album.release_date),
            image: album.images.first().map(|i| i.url.clone()),
            spotify_url: album.external_urls.spotify.clone(),
            genres: album.genres.clone(),
            total_tracks: album.total_tracks,
            rating: 0,
            notes: String::new(),
            added_at,
            rank,
            artist_ranks: BTreeMap::new(),
        }
    }

    pub fn decade(&self) -> i32 {
        utils::decade_of(self.year)
    }

    pub fn is_rated(&self) -> bool {
        self.rating > 0
    }

    /// Position of this album within `artist`'s own ranking.
    pub fn artist_rank(&self, artist: &str) -> ArtistRank {
        self.artist_ranks
            .get(artist)
            .map_or(ArtistRank::Unranked, |r| ArtistRank::Ranked(*r))
    }

    pub fn set_artist_rank(&mut self, artist: &str, rank: u32) {
        self.artist_ranks.insert(artist.to_string(), rank);
    }
}

/// Rank of an album inside one artist's ordering.
///
/// Entries are created lazily, so most albums start out `Unranked`.
/// `Ranked(_)` always orders before `Unranked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArtistRank {
    Ranked(u32),
    Unranked,
}

/// Which of the two ordering spaces a ranking operation acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingScope {
    Global,
    Artist(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DateAdded,
    Rating,
    Year,
    Artist,
    Name,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dateadded" | "date-added" | "added" => Ok(SortKey::DateAdded),
            "rating" => Ok(SortKey::Rating),
            "year" => Ok(SortKey::Year),
            "artist" => Ok(SortKey::Artist),
            "name" => Ok(SortKey::Name),
            other => Err(format!(
                "Invalid sort key: {}. Expected one of dateAdded, rating, year, artist, name",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecadeFilter {
    #[default]
    All,
    Decade(i32),
}

impl FromStr for DecadeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        if value == "all" {
            return Ok(DecadeFilter::All);
        }

        value
            .trim_end_matches('s')
            .parse::<i32>()
            .map(|year| DecadeFilter::Decade(utils::decade_of(year)))
            .map_err(|_| format!("Invalid decade: {}. Use 'all' or a year like 1990", s))
    }
}

/// Aggregates derived from a collection snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub total_albums: usize,
    /// `(decade, count)`, newest decade first.
    pub decade_counts: Vec<(i32, usize)>,
    pub top_decade: Option<(i32, usize)>,
    /// `(artist, count)`, most collected first, at most five entries.
    pub artist_counts: Vec<(String, usize)>,
    pub top_artist: Option<(String, usize)>,
    pub average_rating: f64,
    pub rated_count: usize,
    pub five_star_count: usize,
    /// Best rated album per decade, newest decade first.
    pub top_rated_by_decade: Vec<(i32, AlbumRecord)>,
    pub recent_albums: Vec<AlbumRecord>,
    pub year_range: Option<YearRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.first, self.last)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub expires_in: u64,
}

/// A client-credentials access token and when it was issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientToken {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSearchResult {
    #[serde(default)]
    pub albums: Option<Paging<CatalogAlbum>>,
}

impl CatalogSearchResult {
    pub fn album_items(&self) -> &[CatalogAlbum] {
        self.albums.as_ref().map_or(&[], |page| page.items.as_slice())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub album_type: Option<String>,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub release_date_precision: Option<String>,
    #[serde(default)]
    pub total_tracks: u32,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Tabled)]
pub struct SearchTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub name: String,
    pub artists: String,
    pub year: i32,
    pub id: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub name: String,
    pub artist: String,
    pub year: i32,
    pub rating: String,
    pub added: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct RankingTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub artist: String,
    pub year: i32,
    pub rating: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub artist: String,
    pub albums: usize,
}

#[derive(Tabled)]
pub struct DecadeTableRow {
    pub decade: String,
    pub albums: usize,
    pub share: String,
}
