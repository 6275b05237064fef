use std::sync::Arc;

use indicatif::ProgressBar;
use tokio::sync::Semaphore;

use crate::{
    Res,
    catalog::PlaylistWithSongs,
    pipeline::{InterruptFlag, Matcher},
};

/// Playlists matched concurrently. YouTube tolerates more than Spotify.
pub const ENRICH_CONCURRENCY: usize = 6;

/// Counts of what happened to the songs during one enrichment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    pub matched: usize,
    pub misses: usize,
    pub failed: usize,
    pub skipped: usize,
    pub interrupted: bool,
}

impl EnrichSummary {
    fn merge(&mut self, other: EnrichSummary) {
        self.matched += other.matched;
        self.misses += other.misses;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.interrupted |= other.interrupted;
    }
}

/// Sets the YouTube fields of every song in place.
///
/// One worker owns one playlist and walks its songs in order; up to
/// `concurrency` playlists are worked on at once. Each worker checks
/// `interrupt` before every song and stops there once it is set, so the
/// first songs of a playlist are matched and the rest keep their previous
/// values. Playlist order is preserved. A worker that panics leaves its
/// playlist unchanged and counts all of its songs as failed.
pub async fn enrich_playlists(
    playlists: &mut Vec<PlaylistWithSongs>,
    matcher: Arc<Matcher>,
    concurrency: usize,
    interrupt: &InterruptFlag,
    pb: &ProgressBar,
) -> Res<EnrichSummary> {
    pb.set_length(playlists.len() as u64);
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let mut handles = Vec::with_capacity(playlists.len());
    for playlist in std::mem::take(playlists) {
        let matcher = Arc::clone(&matcher);
        let semaphore = Arc::clone(&semaphore);
        let interrupt = interrupt.clone();
        let pb = pb.clone();
        let fallback = playlist.clone();

        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let enriched = enrich_playlist(playlist, &matcher, &interrupt).await;
            pb.inc(1);
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(enriched)
        });
        handles.push((handle, fallback));
    }

    // A worker that dies keeps its playlist as it was; the others still count.
    let mut summary = EnrichSummary::default();
    for (handle, fallback) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(join_err) => Err(join_err.into()),
        };

        match result {
            Ok((playlist, playlist_summary)) => {
                summary.merge(playlist_summary);
                playlists.push(playlist);
            }
            Err(e) => {
                tracing::error!(playlist = %fallback.shell.name, "enrichment worker failed: {}", e);
                summary.failed += fallback.songs.len();
                playlists.push(fallback);
            }
        }
    }

    summary.interrupted |= interrupt.is_set();
    Ok(summary)
}

async fn enrich_playlist(
    mut playlist: PlaylistWithSongs,
    matcher: &Matcher,
    interrupt: &InterruptFlag,
) -> (PlaylistWithSongs, EnrichSummary) {
    let mut summary = EnrichSummary::default();
    let total = playlist.songs.len();

    for (index, song) in playlist.songs.iter_mut().enumerate() {
        if interrupt.is_set() {
            summary.skipped = total - index;
            summary.interrupted = true;
            tracing::debug!(playlist = %playlist.shell.name, index, "enrichment interrupted");
            break;
        }

        match matcher.resolve(song).await {
            Ok(entry) => {
                if entry.is_miss() {
                    summary.misses += 1;
                } else {
                    summary.matched += 1;
                }
                song.apply_match(&entry);
            }
            Err(e) => {
                summary.failed += 1;
                tracing::warn!(song = %song.name, spotify_url = %song.spotify_url, "youtube search failed: {}", e);
            }
        }
    }

    (playlist, summary)
}
