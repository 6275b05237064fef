use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// One page of a Spotify offset-paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedPlaylist {
    pub id: String,
    pub name: String,
    pub tracks: PlaylistTracksRef,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub owner: PlaylistOwner,
}

/// Entry of a playlist track listing or of the saved tracks listing.
///
/// `track` is null for removed or regionally unavailable tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackObject {
    #[serde(default)]
    pub name: String,
    pub artists: Option<Vec<TrackArtist>>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistObject {
    pub name: String,
}

/// Period over which Spotify computes a user's top items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TimeRange {
    /// About the last four weeks.
    #[value(name = "short_term")]
    ShortTerm,
    /// About the last six months.
    #[default]
    #[value(name = "medium_term")]
    MediumTerm,
    /// About the last year.
    #[value(name = "long_term")]
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub songs: u64,
    pub owner: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeSearchResponse {
    #[serde(default)]
    pub items: Vec<YoutubeSearchItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeSearchItem {
    pub id: Option<YoutubeResourceId>,
    pub snippet: Option<YoutubeSnippet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeResourceId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeSnippet {
    pub title: Option<String>,
}
