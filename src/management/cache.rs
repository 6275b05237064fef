use std::{
    collections::HashMap,
    fmt,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tokio::sync::Mutex;

/// A cached YouTube match for one Spotify track.
///
/// `youtube_url == None` is a negative entry: the search found nothing usable
/// and is not repeated within the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub youtube_url: Option<String>,
    pub validated: bool,
}

impl CacheEntry {
    pub fn new(youtube_url: Option<String>, validated: bool) -> Self {
        Self {
            youtube_url,
            validated,
        }
    }

    pub fn miss() -> Self {
        Self::new(None, false)
    }

    pub fn is_miss(&self) -> bool {
        self.youtube_url.is_none()
    }
}

#[derive(Debug)]
pub enum CacheError {
    NotFound(PathBuf),
    IoError(io::Error),
    SerdeError(serde_json::Error),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::NotFound(path) => {
                write!(f, "Cache file {} does not exist", path.display())
            }
            CacheError::IoError(e) => write!(f, "Cannot read cache file: {}", e),
            CacheError::SerdeError(e) => write!(f, "Cache file is not a playlist document: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<io::Error> for CacheError {
    fn from(err: io::Error) -> Self {
        CacheError::IoError(err)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::SerdeError(err)
    }
}

// Preloading only needs three fields of each song, so it reads documents
// leniently instead of through the full catalog types.
#[derive(Deserialize)]
struct CachedPlaylist {
    #[serde(default)]
    songs: Vec<CachedSong>,
}

#[derive(Deserialize)]
struct CachedSong {
    spotify_url: String,
    #[serde(default)]
    youtube_url: Option<String>,
    #[serde(default)]
    youtube_url_validated: bool,
}

/// Spotify URL to YouTube match store shared by all enrichment workers.
///
/// Every access goes through one async mutex.
#[derive(Debug, Default)]
pub struct LookupCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lookup(&self, spotify_url: &str) -> Option<CacheEntry> {
        self.entries.lock().await.get(spotify_url).cloned()
    }

    /// Inserts or unconditionally overwrites the entry for `spotify_url`.
    pub async fn put(&self, spotify_url: &str, youtube_url: Option<String>, validated: bool) {
        self.entries
            .lock()
            .await
            .insert(spotify_url.to_string(), CacheEntry::new(youtube_url, validated));
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Seeds the cache from a previously downloaded playlist document.
    ///
    /// Songs without a YouTube URL are skipped. Unvalidated matches are only
    /// taken when `include_unvalidated` is set. Returns the number of entries
    /// written.
    pub async fn preload(&self, path: &Path, include_unvalidated: bool) -> Result<usize, CacheError> {
        let content = match async_fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CacheError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(CacheError::IoError(e)),
        };
        let playlists: Vec<CachedPlaylist> = serde_json::from_str(&content)?;

        let mut entries = self.entries.lock().await;
        let mut inserted = 0;
        for song in playlists.into_iter().flat_map(|p| p.songs) {
            let Some(youtube_url) = song.youtube_url else {
                continue;
            };
            if !song.youtube_url_validated && !include_unvalidated {
                continue;
            }

            entries.insert(
                song.spotify_url,
                CacheEntry::new(Some(youtube_url), song.youtube_url_validated),
            );
            inserted += 1;
        }

        tracing::debug!(inserted, path = %path.display(), "preloaded lookup cache");
        Ok(inserted)
    }
}
