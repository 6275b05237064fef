//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API needed to
//! download a user's library: authentication, the paginated playlist and
//! saved-track listings, and the conversion of raw listings into catalog
//! playlists.
//!
//! ## Architecture
//!
//! ```text
//! Pipeline (fan-out, orchestration)
//!          ↓
//! playlists (shell listing, materialization, liked songs)
//!          ↓
//! PlaylistSource trait ── SpotifyClient (reqwest, token refresh, retries)
//!          ↓
//! Spotify Web API
//! ```
//!
//! Everything above the [`PlaylistSource`] trait is written against the trait
//! so the pipeline can run against an in-memory source in tests.
//!
//! ## API Coverage
//!
//! - `GET /me` - Current user id, used for the default filename and the
//!   liked songs owner
//! - `GET /me/playlists` - Playlist shells
//! - `GET /playlists/{id}/tracks` - Songs of one playlist
//! - `GET /me/tracks` - Liked songs
//! - `GET /playlists/{id}` - A single playlist shell, for `playlists show`
//! - `GET /me/top/{tracks,artists}` - The user's top items
//! - `POST /api/token` - Token exchange and refresh operations
//!
//! ## Error Handling
//!
//! - **502 Bad Gateway**: retried after 10 seconds, a bounded number of times
//! - **429 Too Many Requests**: waits for `Retry-After` when it is at most
//!   120 seconds, otherwise fails
//! - Everything else propagates to the caller and aborts the command

pub mod auth;
pub mod client;
pub mod playlists;
pub mod top;

use async_trait::async_trait;

use crate::{
    Res,
    types::{
        ArtistObject, CurrentUser, Page, SimplifiedPlaylist, TimeRange, TrackItem, TrackObject,
    },
};

pub use client::SpotifyClient;

/// Raw, paginated access to a Spotify account.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn current_user(&self) -> Res<CurrentUser>;

    async fn list_playlists(&self, limit: u32, offset: u32) -> Res<Page<SimplifiedPlaylist>>;

    async fn list_playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Res<Page<TrackItem>>;

    async fn list_saved_tracks(&self, limit: u32, offset: u32) -> Res<Page<TrackItem>>;

    /// Fails when no playlist with this id exists or it is not visible.
    async fn get_playlist(&self, playlist_id: &str) -> Res<SimplifiedPlaylist>;

    async fn top_tracks(
        &self,
        time_range: TimeRange,
        limit: u32,
        offset: u32,
    ) -> Res<Page<TrackObject>>;

    async fn top_artists(
        &self,
        time_range: TimeRange,
        limit: u32,
        offset: u32,
    ) -> Res<Page<ArtistObject>>;
}
