use std::sync::Arc;

use crate::{
    cli::require_login,
    config, error, info,
    pipeline::{DownloadError, DownloadOptions, Downloader},
    spotify::SpotifyClient,
    success, utils, warning,
    youtube::YoutubeClient,
};

/// Downloads all playlists and liked songs into one JSON file.
///
/// Filename and flag problems are reported before anything is fetched. Any
/// Spotify failure aborts without writing. An interrupted YouTube matching
/// run still writes what was matched.
pub async fn download(opts: DownloadOptions) {
    if let Some(filename) = &opts.filename {
        if let Err(e) = utils::validate_filename(filename) {
            error!("{}", e);
        }
    }

    let token_mgr = require_login().await;
    let mut downloader = Downloader::new(Arc::new(SpotifyClient::new(token_mgr)));

    if opts.with_youtube_url {
        match config::youtube_api_key() {
            Some(key) => downloader = downloader.with_search(Arc::new(YoutubeClient::new(key))),
            None => error!("{}", DownloadError::MissingSearch),
        }
    }

    info!("Downloading playlists...");
    let report = match utils::timed("download", downloader.run(&opts)).await {
        Ok(report) => report,
        Err(e) => error!("{}", e),
    };

    success!(
        "Wrote {} playlists with {} songs to {}",
        report.playlists,
        report.songs,
        report.path.display()
    );

    if let Some(summary) = report.enrichment {
        info!(
            "{} of {} songs have a YouTube URL ({} new matches, {} without match, {} failed searches)",
            report.with_youtube_url,
            report.songs,
            summary.matched,
            summary.misses,
            summary.failed
        );
    }

    if report.interrupted() {
        warning!("Matching was interrupted. Run again with --with-youtube-url-cache-from {} --with-youtube-url-cache-unvalidated to continue.", report.path.display());
    }
}
