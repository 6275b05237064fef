//! # YouTube Integration Module
//!
//! Text search against YouTube, used to find the YouTube Music counterpart of
//! a Spotify song. The [`SongSearch`] trait is the seam the matcher is
//! written against; [`YoutubeClient`] implements it on top of the YouTube
//! Data API v3 `search` endpoint.

pub mod client;

use async_trait::async_trait;

use crate::Res;

pub use client::YoutubeClient;

/// Canonical URL of a YouTube Music video; `{id}` is replaced by the video id.
pub const YOUTUBE_URL_TEMPLATE: &str = "https://music.youtube.com/watch?v={id}";

pub fn youtube_url(video_id: &str) -> String {
    YOUTUBE_URL_TEMPLATE.replace("{id}", video_id)
}

/// Restricts which kind of content a search may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    /// Videos in the Music category.
    Song,
}

impl SearchFilter {
    pub fn query_params(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            SearchFilter::Song => &[("type", "video"), ("videoCategoryId", "10")],
        }
    }
}

/// One search hit. Either field may be missing in what the service returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub title: Option<String>,
    pub video_id: Option<String>,
}

#[async_trait]
pub trait SongSearch: Send + Sync {
    /// Returns at most `limit` results, best match first.
    async fn search(&self, query: &str, filter: SearchFilter, limit: u32)
    -> Res<Vec<SearchResult>>;
}
