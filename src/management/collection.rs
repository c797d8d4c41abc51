use std::{
    future::Future,
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    config,
    types::{AlbumRecord, CatalogAlbum, MAX_RATING},
    warning,
};

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("This album is already in your collection: {0}")]
    AlreadyInCollection(String),
    #[error("Album {0} is not in your collection")]
    NotFound(String),
    #[error("Invalid rating {0}, expected 0 (unrated) to 5")]
    InvalidRating(u8),
    #[error("collection I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot serialize collection: {0}")]
    Serde(#[from] serde_json::Error),
}

/// The slot holding the serialized collection.
///
/// Reads report `None` when nothing has been stored yet. Writes replace the
/// whole slot.
pub trait Storage {
    fn read(&self) -> impl Future<Output = Option<String>> + Send;
    fn write(&self, contents: &str) -> impl Future<Output = Result<(), CollectionError>> + Send;
}

/// Collection slot backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

impl Storage for FileStorage {
    async fn read(&self) -> Option<String> {
        async_fs::read_to_string(&self.path).await.ok()
    }

    async fn write(&self, contents: &str) -> Result<(), CollectionError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        // readers must never see a half-written file
        let staging = self.staging_path();
        async_fs::write(&staging, contents).await?;
        async_fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

/// In-process collection slot.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(contents.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Storage for MemoryStorage {
    async fn read(&self) -> Option<String> {
        self.contents()
    }

    async fn write(&self, contents: &str) -> Result<(), CollectionError> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(contents.to_string());
        Ok(())
    }
}

/// Owner of the saved albums.
///
/// Every mutation reads the whole collection, transforms it and writes the
/// whole collection back. There is no revision check on the stored data, so
/// two writers racing on the same file lose updates; one writer at a time is
/// assumed.
pub struct CollectionStore<S> {
    storage: S,
}

impl CollectionStore<FileStorage> {
    /// Opens the collection file at [`config::collection_path`].
    pub fn open_default() -> Self {
        Self::new(FileStorage::new(config::collection_path()))
    }
}

impl<S: Storage> CollectionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the collection.
    ///
    /// A missing slot yields an empty collection, and so does malformed data
    /// (after a warning). This never fails.
    ///
    /// # Returns
    ///
    /// Every saved record in storage order, which is the order albums were
    /// added in. Use [`crate::management::ranking::global_order`] for the
    /// ranked order.
    pub async fn load(&self) -> Vec<AlbumRecord> {
        let Some(content) = self.storage.read().await else {
            return Vec::new();
        };

        if content.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warning!("Collection data is unreadable, starting empty. Err: {}", e);
                Vec::new()
            }
        }
    }

    /// Replaces the stored collection with `records`.
    pub async fn save(&self, records: &[AlbumRecord]) -> Result<(), CollectionError> {
        let json = serde_json::to_string_pretty(records)?;
        self.storage.write(&json).await
    }

    pub async fn get(&self, id: &str) -> Option<AlbumRecord> {
        self.load().await.into_iter().find(|r| r.id == id)
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.load().await.iter().any(|r| r.id == id)
    }

    /// Appends `record` at the end of the global ranking.
    ///
    /// The record's `rank` is overwritten with [`next_rank`]. An id that is
    /// already saved is rejected and the collection stays untouched.
    ///
    /// # Arguments
    ///
    /// * `record` - The album to save. Its `rank` field is ignored.
    ///
    /// # Returns
    ///
    /// The record as stored, carrying its assigned rank.
    ///
    /// # Errors
    ///
    /// * [`CollectionError::AlreadyInCollection`] if the id is already saved
    /// * [`CollectionError::Io`] or [`CollectionError::Serde`] if the write fails
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = CollectionStore::new(MemoryStorage::new());
    /// let saved = store.add(record).await?;
    /// assert_eq!(saved.rank, 1);
    /// ```
    pub async fn add(&self, mut record: AlbumRecord) -> Result<AlbumRecord, CollectionError> {
        let mut records = self.load().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(CollectionError::AlreadyInCollection(record.id));
        }

        record.rank = next_rank(&records);
        records.push(record.clone());
        self.save(&records).await?;
        Ok(record)
    }

    /// Saves a catalog album as a new unrated record.
    pub async fn add_from_catalog(
        &self,
        album: &CatalogAlbum,
        added_at: DateTime<Utc>,
    ) -> Result<AlbumRecord, CollectionError> {
        self.add(AlbumRecord::from_catalog(album, added_at, 0)).await
    }

    /// Removes the album with `id`, returning whether it was present.
    ///
    /// Ranks of the remaining albums are left as they are.
    pub async fn remove(&self, id: &str) -> Result<bool, CollectionError> {
        let mut records = self.load().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }

        self.save(&records).await?;
        Ok(true)
    }

    /// Sets the star rating of the album with `id`.
    ///
    /// # Arguments
    ///
    /// * `id` - Catalog id of a saved album
    /// * `rating` - `0` for unrated, otherwise `1..=5`
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidRating`] for ratings above five,
    /// without touching storage, and [`CollectionError::NotFound`] when the
    /// album is not saved.
    pub async fn update_rating(
        &self,
        id: &str,
        rating: u8,
    ) -> Result<AlbumRecord, CollectionError> {
        if rating > MAX_RATING {
            return Err(CollectionError::InvalidRating(rating));
        }

        self.update_one(id, |r| r.rating = rating).await
    }

    /// Replaces the free-text notes of the album with `id`.
    pub async fn update_notes(
        &self,
        id: &str,
        notes: &str,
    ) -> Result<AlbumRecord, CollectionError> {
        self.update_one(id, |r| r.notes = notes.to_string()).await
    }

    async fn update_one(
        &self,
        id: &str,
        update: impl FnOnce(&mut AlbumRecord),
    ) -> Result<AlbumRecord, CollectionError> {
        let mut records = self.load().await;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Err(CollectionError::NotFound(id.to_string()));
        };

        update(record);
        let updated = record.clone();
        self.save(&records).await?;
        Ok(updated)
    }
}

/// Rank given to a newly added album: one past the highest stored rank.
///
/// For a densely ranked collection this is `count + 1`. After deletions have
/// left gaps it still never collides with an existing rank.
pub fn next_rank(records: &[AlbumRecord]) -> u32 {
    records.iter().map(|r| r.rank).max().unwrap_or(0) + 1
}
