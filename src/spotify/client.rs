use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::{sync::Mutex, time::sleep};

use crate::{
    Res, config,
    management::TokenManager,
    spotify::PlaylistSource,
    types::{
        ArtistObject, CurrentUser, Page, SimplifiedPlaylist, TimeRange, TrackItem, TrackObject,
    },
};

const BAD_GATEWAY_RETRIES: u32 = 5;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Spotify Web API client authenticated through the persisted session.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token_mgr: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(token_mgr: TokenManager) -> Self {
        Self {
            http: Client::new(),
            api_url: config::spotify_apiurl(),
            token_mgr: Mutex::new(token_mgr),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Res<T> {
        let api_url = format!("{uri}{path}", uri = self.api_url, path = path);
        let mut bad_gateways = 0;

        loop {
            let token = self.token_mgr.lock().await.get_valid_token().await;
            let response = self.http.get(&api_url).bearer_auth(token).send().await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);
                if retry_after > MAX_RETRY_AFTER_SECS {
                    return Err(format!(
                        "Spotify rate limit asks to wait {} seconds. Try again later.",
                        retry_after
                    )
                    .into());
                }

                tracing::debug!(retry_after, url = %api_url, "rate limited by spotify");
                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }

            match response.error_for_status() {
                Ok(valid_response) => return Ok(valid_response.json::<T>().await?),
                Err(err) => {
                    if err.status() == Some(StatusCode::BAD_GATEWAY)
                        && bad_gateways < BAD_GATEWAY_RETRIES
                    {
                        bad_gateways += 1;
                        tracing::debug!(attempt = bad_gateways, url = %api_url, "bad gateway, retrying");
                        sleep(BAD_GATEWAY_DELAY).await;
                        continue;
                    }

                    return Err(err.into());
                }
            }
        }
    }
}

#[async_trait]
impl PlaylistSource for SpotifyClient {
    async fn current_user(&self) -> Res<CurrentUser> {
        self.get("/me").await
    }

    async fn list_playlists(&self, limit: u32, offset: u32) -> Res<Page<SimplifiedPlaylist>> {
        self.get(&format!("/me/playlists?limit={limit}&offset={offset}"))
            .await
    }

    async fn list_playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Res<Page<TrackItem>> {
        self.get(&format!(
            "/playlists/{playlist_id}/tracks?limit={limit}&offset={offset}"
        ))
        .await
    }

    async fn list_saved_tracks(&self, limit: u32, offset: u32) -> Res<Page<TrackItem>> {
        self.get(&format!("/me/tracks?limit={limit}&offset={offset}"))
            .await
    }

    async fn get_playlist(&self, playlist_id: &str) -> Res<SimplifiedPlaylist> {
        self.get(&format!(
            "/playlists/{playlist_id}?fields=id,name,external_urls,owner(id),tracks(total)"
        ))
        .await
    }

    async fn top_tracks(
        &self,
        time_range: TimeRange,
        limit: u32,
        offset: u32,
    ) -> Res<Page<TrackObject>> {
        self.get(&format!(
            "/me/top/tracks?time_range={}&limit={limit}&offset={offset}",
            time_range.as_str()
        ))
        .await
    }

    async fn top_artists(
        &self,
        time_range: TimeRange,
        limit: u32,
        offset: u32,
    ) -> Res<Page<ArtistObject>> {
        self.get(&format!(
            "/me/top/artists?time_range={}&limit={limit}&offset={offset}",
            time_range.as_str()
        ))
        .await
    }
}
