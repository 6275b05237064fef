//! Spotify Playlist Downloader CLI Library
//!
//! This library provides functionality for downloading a user's Spotify
//! playlists and liked songs into a single JSON document, optionally matching
//! every song to a YouTube Music URL. It includes modules for API
//! communication, the download pipeline, CLI operations, configuration
//! management and various helpers.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `catalog` - Songs and playlists as written to the output document
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Session token and lookup cache management
//! - `pipeline` - Concurrent playlist fetching, enrichment and orchestration
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Wire data structures of the external services
//! - `utils` - Utility functions and helpers
//! - `youtube` - YouTube search client implementation

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod management;
pub mod pipeline;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod youtube;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// ```
/// info!("Fetching playlists...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a one-line error message with a red exclamation mark and exits the
/// program with status 1.
///
/// Only the CLI layer uses this macro. Library code returns errors and lets
/// the command entry point decide how to report them.
///
/// ```
/// error!("Filename must end with .json");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] ERROR: {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues that users should notice, such as an
/// interrupted enrichment run.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
