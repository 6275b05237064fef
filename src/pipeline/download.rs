use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Local;

use crate::{
    Res, catalog,
    management::{CacheError, LookupCache},
    pipeline::{
        CONTENT_CONCURRENCY, ENRICH_CONCURRENCY, EnrichSummary, InterruptFlag, Matcher,
        enrich_playlists, fetch_contents, install_signal_handlers, progress_bar,
    },
    spotify::{PlaylistSource, playlists},
    utils,
    youtube::SongSearch,
};

#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    pub filename: Option<String>,
    pub show_progress: bool,
    pub with_youtube_url: bool,
    pub youtube_url_cache_from: Option<PathBuf>,
    pub youtube_url_cache_unvalidated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadState {
    ResolvingFilename,
    FetchingShells,
    FetchingContent,
    EnrichingYoutubeUrls,
    Serializing,
    Done,
    Aborted,
}

#[derive(Debug)]
pub enum DownloadError {
    InvalidFilename(String),
    MissingCacheFile(PathBuf),
    MissingSearch,
    Write(PathBuf, Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::InvalidFilename(msg) => write!(f, "{}", msg),
            DownloadError::MissingCacheFile(path) => {
                write!(f, "Cache file {} does not exist", path.display())
            }
            DownloadError::MissingSearch => {
                write!(f, "YOUTUBE_API_KEY must be set to match songs with YouTube")
            }
            DownloadError::Write(path, e) => {
                write!(f, "Cannot write {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for DownloadError {}

/// What a finished download wrote.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub path: PathBuf,
    pub playlists: usize,
    pub songs: usize,
    pub with_youtube_url: usize,
    pub enrichment: Option<EnrichSummary>,
}

impl DownloadReport {
    pub fn interrupted(&self) -> bool {
        self.enrichment.is_some_and(|s| s.interrupted)
    }
}

/// Runs one `download` command from filename resolution to the written file.
///
/// Every phase completes in memory before the next starts. The output file
/// is only opened once all fetching and matching is done, so an aborted
/// download leaves nothing on disk.
pub struct Downloader {
    source: Arc<dyn PlaylistSource>,
    search: Option<Arc<dyn SongSearch>>,
    interrupt: InterruptFlag,
    handle_signals: bool,
    state: DownloadState,
}

impl Downloader {
    pub fn new(source: Arc<dyn PlaylistSource>) -> Self {
        Self {
            source,
            search: None,
            interrupt: InterruptFlag::new(),
            handle_signals: true,
            state: DownloadState::ResolvingFilename,
        }
    }

    pub fn with_search(mut self, search: Arc<dyn SongSearch>) -> Self {
        self.search = Some(search);
        self
    }

    /// Uses `interrupt` instead of a fresh flag.
    pub fn with_interrupt(mut self, interrupt: InterruptFlag) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Whether Ctrl-C and SIGTERM raise the interrupt flag during matching.
    pub fn handle_signals(mut self, handle: bool) -> Self {
        self.handle_signals = handle;
        self
    }

    pub fn state(&self) -> DownloadState {
        self.state
    }

    pub async fn run(&mut self, opts: &DownloadOptions) -> Res<DownloadReport> {
        let result = self.run_phases(opts).await;
        if result.is_err() {
            self.enter(DownloadState::Aborted);
        }
        result
    }

    fn enter(&mut self, state: DownloadState) {
        tracing::debug!(from = ?self.state, to = ?state, "download state");
        self.state = state;
    }

    async fn run_phases(&mut self, opts: &DownloadOptions) -> Res<DownloadReport> {
        self.enter(DownloadState::ResolvingFilename);
        if let Some(filename) = &opts.filename {
            utils::validate_filename(filename).map_err(DownloadError::InvalidFilename)?;
        }
        if opts.with_youtube_url && self.search.is_none() {
            return Err(DownloadError::MissingSearch.into());
        }

        let user = self.source.current_user().await?;
        let path = match &opts.filename {
            Some(filename) => PathBuf::from(filename.trim()),
            None => PathBuf::from(utils::default_filename(&user.id, &Local::now())),
        };

        self.enter(DownloadState::FetchingShells);
        let shells = playlists::list_shells(self.source.as_ref()).await?;

        self.enter(DownloadState::FetchingContent);
        let pb = progress_bar(
            shells.len() as u64 + 1,
            "Fetching playlists",
            opts.show_progress,
        );
        let mut contents = fetch_contents(
            Arc::clone(&self.source),
            shells,
            &user.id,
            CONTENT_CONCURRENCY,
            &pb,
        )
        .await?;
        pb.finish_and_clear();

        let mut enrichment = None;
        if opts.with_youtube_url {
            self.enter(DownloadState::EnrichingYoutubeUrls);
            enrichment = Some(self.enrich(&mut contents, opts).await?);
        }

        self.enter(DownloadState::Serializing);
        write_output(&path, &contents).await?;

        self.enter(DownloadState::Done);
        Ok(DownloadReport {
            path,
            playlists: contents.len(),
            songs: contents.iter().map(|p| p.songs.len()).sum(),
            with_youtube_url: contents
                .iter()
                .flat_map(|p| &p.songs)
                .filter(|s| s.youtube_url.is_some())
                .count(),
            enrichment,
        })
    }

    async fn enrich(
        &self,
        contents: &mut Vec<catalog::PlaylistWithSongs>,
        opts: &DownloadOptions,
    ) -> Res<EnrichSummary> {
        let search = self.search.clone().ok_or(DownloadError::MissingSearch)?;

        let cache = LookupCache::new();
        if let Some(cache_path) = &opts.youtube_url_cache_from {
            match cache
                .preload(cache_path, opts.youtube_url_cache_unvalidated)
                .await
            {
                Ok(inserted) => tracing::info!(inserted, "preloaded youtube urls"),
                Err(CacheError::NotFound(path)) => {
                    return Err(DownloadError::MissingCacheFile(path).into());
                }
                Err(e) => return Err(e.into()),
            }
        }
        let matcher = Arc::new(Matcher::with_cache(search, cache));

        let signals = if self.handle_signals {
            Some(install_signal_handlers(self.interrupt.clone())?)
        } else {
            None
        };

        let pb = progress_bar(
            contents.len() as u64,
            "Matching YouTube URLs",
            opts.show_progress,
        );
        let summary = enrich_playlists(
            contents,
            matcher,
            ENRICH_CONCURRENCY,
            &self.interrupt,
            &pb,
        )
        .await;
        pb.finish_and_clear();

        if let Some(signals) = signals {
            signals.abort();
        }
        summary
    }
}

async fn write_output(path: &Path, contents: &[catalog::PlaylistWithSongs]) -> Res<()> {
    catalog::write_document(path, contents)
        .await
        .map_err(|e| DownloadError::Write(path.to_path_buf(), e).into())
}
