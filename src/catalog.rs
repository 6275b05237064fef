//! Songs and playlists as they are materialized from Spotify and written to
//! the output document.
//!
//! The serialized field names are fixed: the cache preload step and the
//! external validator both read documents produced here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Res, management::CacheEntry};

/// Placeholder stored as `spotify_url` when Spotify reports no external URL
/// for a track. Every such track shares this cache key.
pub const MISSING_SPOTIFY_URL: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    pub artists: Vec<String>,
    pub spotify_url: String,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub youtube_url_validated: bool,
}

impl Song {
    pub fn new(name: impl Into<String>, artists: Vec<String>, spotify_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artists,
            spotify_url: spotify_url.into(),
            youtube_url: None,
            youtube_url_validated: false,
        }
    }

    /// Copies a resolved match onto the song.
    ///
    /// A song is only marked validated when it also carries a URL.
    pub fn apply_match(&mut self, entry: &CacheEntry) {
        self.youtube_url = entry.youtube_url.clone();
        self.youtube_url_validated = entry.validated && self.youtube_url.is_some();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistShell {
    pub id: String,
    pub name: String,
    pub total: u64,
    pub external_url: String,
    #[serde(rename = "owner_spotify_id")]
    pub owner_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistWithSongs {
    #[serde(flatten)]
    pub shell: PlaylistShell,
    pub songs: Vec<Song>,
}

impl PlaylistWithSongs {
    pub fn new(shell: PlaylistShell, songs: Vec<Song>) -> Self {
        Self { shell, songs }
    }
}

/// Writes all playlists as one pretty-printed JSON array.
pub async fn write_document(path: &Path, playlists: &[PlaylistWithSongs]) -> Res<()> {
    let json = serde_json::to_string_pretty(playlists)?;
    async_fs::write(path, json).await?;
    Ok(())
}

/// Reads a document previously produced by [`write_document`].
pub async fn read_document(path: &Path) -> Res<Vec<PlaylistWithSongs>> {
    let content = async_fs::read_to_string(path).await?;
    let playlists: Vec<PlaylistWithSongs> = serde_json::from_str(&content)?;
    Ok(playlists)
}
