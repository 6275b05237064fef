//! # Download Pipeline
//!
//! Turns a Spotify account into a list of playlists with songs, optionally
//! matched to YouTube Music, and writes it to disk.
//!
//! ```text
//! Downloader
//!   ├── list shells                    (sequential)
//!   ├── fetch_contents                 (3 concurrent playlists, ordered, liked songs last)
//!   ├── enrich_playlists               (6 concurrent playlists, songs in order,
//!   │     └── Matcher → LookupCache     stops at the InterruptFlag)
//!   │               └── SongSearch
//!   └── write document
//! ```
//!
//! Phases never overlap: each pool drains completely before the next phase
//! starts.

mod download;
mod enrich;
mod fanout;
mod interrupt;
mod matcher;
mod progress;

pub use download::DownloadError;
pub use download::DownloadOptions;
pub use download::DownloadReport;
pub use download::DownloadState;
pub use download::Downloader;
pub use enrich::ENRICH_CONCURRENCY;
pub use enrich::EnrichSummary;
pub use enrich::enrich_playlists;
pub use fanout::CONTENT_CONCURRENCY;
pub use fanout::fetch_contents;
pub use interrupt::InterruptFlag;
pub use interrupt::install_signal_handlers;
pub use matcher::Matcher;
pub use progress::progress_bar;
