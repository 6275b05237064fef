use std::sync::Arc;

use crate::{
    Res,
    catalog::Song,
    management::{CacheEntry, LookupCache},
    utils,
    youtube::{SearchFilter, SongSearch, youtube_url},
};

/// Finds the YouTube Music counterpart of a song, consulting the lookup
/// cache before searching.
///
/// The matcher owns the cache for the lifetime of one download. Only the top
/// search hit is considered and its title is not compared with the song:
/// titles differ too often between the two catalogs for that to help.
pub struct Matcher {
    search: Arc<dyn SongSearch>,
    cache: LookupCache,
}

impl Matcher {
    pub fn new(search: Arc<dyn SongSearch>) -> Self {
        Self::with_cache(search, LookupCache::new())
    }

    pub fn with_cache(search: Arc<dyn SongSearch>, cache: LookupCache) -> Self {
        Self { search, cache }
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    /// Resolves `song` to a cache entry.
    ///
    /// Fresh matches are always unvalidated. A search that yields nothing
    /// usable is cached as a miss so it is not repeated. Transport errors are
    /// returned without touching the cache.
    pub async fn resolve(&self, song: &Song) -> Res<CacheEntry> {
        if let Some(entry) = self.cache.lookup(&song.spotify_url).await {
            return Ok(entry);
        }

        let query = utils::search_query(&song.name, &song.artists);
        let results = self.search.search(&query, SearchFilter::Song, 1).await?;

        let video_id = results
            .into_iter()
            .next()
            .and_then(|hit| hit.video_id)
            .filter(|id| !id.trim().is_empty());

        let Some(video_id) = video_id else {
            tracing::warn!(
                song = %song.name,
                artists = %song.artists.join(", "),
                spotify_url = %song.spotify_url,
                "no youtube match found"
            );
            self.cache.put(&song.spotify_url, None, false).await;
            return Ok(CacheEntry::miss());
        };

        let url = youtube_url(&video_id);
        self.cache
            .put(&song.spotify_url, Some(url.clone()), false)
            .await;
        Ok(CacheEntry::new(Some(url), false))
    }
}
