#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use spotdump::{
    Res,
    pipeline::InterruptFlag,
    spotify::PlaylistSource,
    types::{
        ArtistObject, CurrentUser, ExternalUrls, Page, PlaylistOwner, PlaylistTracksRef,
        SimplifiedPlaylist, TimeRange, TrackArtist, TrackItem, TrackObject,
    },
    youtube::{SearchFilter, SearchResult, SongSearch},
};

pub const USER_ID: &str = "test-user";

pub fn track(name: &str, artists: &[&str], url: &str) -> TrackItem {
    TrackItem {
        track: Some(TrackObject {
            name: name.to_string(),
            artists: Some(artists.iter().map(|a| TrackArtist { name: a.to_string() }).collect()),
            external_urls: Some(ExternalUrls {
                spotify: Some(url.to_string()),
            }),
        }),
    }
}

/// `count` distinct tracks whose urls start with `prefix`.
pub fn tracks(prefix: &str, count: usize) -> Vec<TrackItem> {
    (0..count)
        .map(|i| {
            let artist = format!("{prefix} artist");
            track(
                &format!("{prefix} song {i}"),
                &[artist.as_str()],
                &format!("https://open.spotify.com/track/{prefix}-{i}"),
            )
        })
        .collect()
}

fn page<T: Clone>(all: &[T], limit: u32, offset: u32) -> Page<T> {
    let start = (offset as usize).min(all.len());
    let end = (start + limit as usize).min(all.len());
    Page {
        items: all[start..end].to_vec(),
        next: (end < all.len()).then(|| format!("offset={end}")),
        total: all.len() as u64,
    }
}

struct MockPlaylist {
    playlist: SimplifiedPlaylist,
    tracks: Vec<TrackItem>,
    delay: Duration,
    fail: bool,
}

/// In-memory Spotify account.
#[derive(Default)]
pub struct MockSource {
    playlists: Vec<MockPlaylist>,
    saved: Vec<TrackItem>,
    top_tracks: Vec<TrackObject>,
    top_artists: Vec<String>,
    active: AtomicUsize,
    pub max_active: AtomicUsize,
    pub track_requests: AtomicUsize,
    pub playlist_requests: AtomicUsize,
    pub saved_requests: AtomicUsize,
    pub top_requests: Mutex<Vec<(TimeRange, u32, u32)>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(self, id: &str, tracks: Vec<TrackItem>) -> Self {
        self.with_delayed_playlist(id, tracks, Duration::ZERO)
    }

    pub fn with_delayed_playlist(mut self, id: &str, tracks: Vec<TrackItem>, delay: Duration) -> Self {
        self.playlists.push(MockPlaylist {
            playlist: SimplifiedPlaylist {
                id: id.to_string(),
                name: format!("Playlist {id}"),
                tracks: PlaylistTracksRef {
                    total: tracks.len() as u64,
                },
                external_urls: ExternalUrls {
                    spotify: Some(format!("https://open.spotify.com/playlist/{id}")),
                },
                owner: PlaylistOwner {
                    id: USER_ID.to_string(),
                },
            },
            tracks,
            delay,
            fail: false,
        });
        self
    }

    pub fn with_failing_playlist(mut self, id: &str) -> Self {
        self = self.with_playlist(id, Vec::new());
        if let Some(last) = self.playlists.last_mut() {
            last.fail = true;
        }
        self
    }

    pub fn with_saved(mut self, tracks: Vec<TrackItem>) -> Self {
        self.saved = tracks;
        self
    }

    pub fn with_top_tracks(mut self, tracks: Vec<TrackItem>) -> Self {
        self.top_tracks = tracks.into_iter().filter_map(|item| item.track).collect();
        self
    }

    pub fn with_top_artists(mut self, artists: &[&str]) -> Self {
        self.top_artists = artists.iter().map(|a| a.to_string()).collect();
        self
    }
}

#[async_trait]
impl PlaylistSource for MockSource {
    async fn current_user(&self) -> Res<CurrentUser> {
        Ok(CurrentUser {
            id: USER_ID.to_string(),
            display_name: Some("Test User".to_string()),
            external_urls: ExternalUrls {
                spotify: Some(format!("https://open.spotify.com/user/{USER_ID}")),
            },
        })
    }

    async fn list_playlists(&self, limit: u32, offset: u32) -> Res<Page<SimplifiedPlaylist>> {
        self.playlist_requests.fetch_add(1, Ordering::SeqCst);
        let all: Vec<SimplifiedPlaylist> =
            self.playlists.iter().map(|p| p.playlist.clone()).collect();
        Ok(page(&all, limit, offset))
    }

    async fn list_playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Res<Page<TrackItem>> {
        self.track_requests.fetch_add(1, Ordering::SeqCst);
        let playlist = self
            .playlists
            .iter()
            .find(|p| p.playlist.id == playlist_id)
            .ok_or("unknown playlist")?;

        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);
        tokio::time::sleep(playlist.delay).await;
        self.active.fetch_sub(1, Ordering::SeqCst);

        if playlist.fail {
            return Err("401 Unauthorized".into());
        }
        Ok(page(&playlist.tracks, limit, offset))
    }

    async fn list_saved_tracks(&self, limit: u32, offset: u32) -> Res<Page<TrackItem>> {
        self.saved_requests.fetch_add(1, Ordering::SeqCst);
        Ok(page(&self.saved, limit, offset))
    }

    async fn get_playlist(&self, playlist_id: &str) -> Res<SimplifiedPlaylist> {
        self.playlists
            .iter()
            .find(|p| p.playlist.id == playlist_id)
            .map(|p| p.playlist.clone())
            .ok_or_else(|| "404 Not Found".into())
    }

    async fn top_tracks(
        &self,
        time_range: TimeRange,
        limit: u32,
        offset: u32,
    ) -> Res<Page<TrackObject>> {
        self.top_requests
            .lock()
            .unwrap()
            .push((time_range, limit, offset));
        Ok(page(&self.top_tracks, limit, offset))
    }

    async fn top_artists(
        &self,
        time_range: TimeRange,
        limit: u32,
        offset: u32,
    ) -> Res<Page<ArtistObject>> {
        self.top_requests
            .lock()
            .unwrap()
            .push((time_range, limit, offset));
        let all: Vec<ArtistObject> = self
            .top_artists
            .iter()
            .map(|name| ArtistObject { name: name.clone() })
            .collect();
        Ok(page(&all, limit, offset))
    }
}

/// Scripted YouTube search.
///
/// Unscripted queries return one hit whose video id is derived from the
/// query. Optionally raises an interrupt flag once a number of searches ran.
#[derive(Default)]
pub struct MockSearch {
    scripted: HashMap<String, Vec<SearchResult>>,
    failing: Vec<String>,
    panicking: Vec<String>,
    interrupt_after: Option<(usize, InterruptFlag)>,
    pub calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, results: Vec<SearchResult>) -> Self {
        self.scripted.insert(query.to_string(), results);
        self
    }

    pub fn with_failure(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    /// The search task for `query` panics instead of returning.
    pub fn with_panic(mut self, query: &str) -> Self {
        self.panicking.push(query.to_string());
        self
    }

    pub fn interrupt_after(mut self, calls: usize, flag: InterruptFlag) -> Self {
        self.interrupt_after = Some((calls, flag));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

pub fn video_id_for(query: &str) -> String {
    query
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

#[async_trait]
impl SongSearch for MockSearch {
    async fn search(
        &self,
        query: &str,
        filter: SearchFilter,
        limit: u32,
    ) -> Res<Vec<SearchResult>> {
        assert_eq!(filter, SearchFilter::Song);
        assert_eq!(limit, 1);

        let calls = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.queries.lock().unwrap().push(query.to_string());
        if let Some((after, flag)) = &self.interrupt_after {
            if calls >= *after {
                flag.set();
            }
        }

        if self.panicking.iter().any(|q| q == query) {
            panic!("search worker crashed on {query}");
        }
        if self.failing.iter().any(|q| q == query) {
            return Err("quota exceeded".into());
        }
        if let Some(results) = self.scripted.get(query) {
            return Ok(results.clone());
        }

        Ok(vec![SearchResult {
            title: Some(query.to_string()),
            video_id: Some(video_id_for(query)),
        }])
    }
}
