use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use spotdump::{
    cli, config,
    pipeline::DownloadOptions,
    types::{PkceToken, TimeRange},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API (default) or manage the session
    Auth(AuthArgs),

    /// Download all playlists and liked songs to a JSON file
    Download(DownloadArgs),

    /// List your playlists (default) or show one of them
    Playlists(PlaylistsArgs),

    /// Your top tracks and artists
    UserTop(UserTopArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthArgs {
    #[clap(subcommand)]
    command: Option<AuthCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Authorize with Spotify API
    Login,

    /// Delete the stored session
    Logout,

    /// Show the logged in user
    CurrentUser {
        /// Show the user's Spotify id
        #[clap(long)]
        show_id: bool,

        /// Show the user's Spotify profile URL
        #[clap(long)]
        show_url: bool,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsArgs {
    #[clap(subcommand)]
    command: Option<PlaylistsCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistsCommand {
    /// List the songs of one playlist
    Show {
        /// The id of the playlist to show
        #[clap(long)]
        playlist_id: String,

        /// Show the Spotify URL of every song
        #[clap(long)]
        show_url: bool,

        /// Show the artists of every song
        #[clap(long)]
        show_artists: bool,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct UserTopArgs {
    #[clap(subcommand)]
    command: UserTopCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum UserTopCommand {
    /// Your most played tracks
    Tracks(TopOptions),

    /// Your most played artists
    Artists(TopOptions),
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    /// Maximum number of items to return
    #[clap(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=50))]
    limit: u32,

    /// Index of the first item to return
    #[clap(long, default_value_t = 0)]
    offset: u32,

    /// Time frame the ranking is computed over
    #[clap(long, value_enum, default_value_t = TimeRange::MediumTerm)]
    time_range: TimeRange,
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadArgs {
    /// Output file, must end with .json [default: playlists-<user>-<timestamp>.json]
    #[clap(long)]
    pub filename: Option<String>,

    /// Show progress bars while fetching and matching
    #[clap(long)]
    pub show_progress: bool,

    /// Search a YouTube Music URL for every song (needs YOUTUBE_API_KEY)
    #[clap(long)]
    pub with_youtube_url: bool,

    /// Reuse YouTube URLs from a previous download instead of searching again
    #[clap(long, value_name = "FILE", requires = "with_youtube_url")]
    pub with_youtube_url_cache_from: Option<PathBuf>,

    /// Also reuse YouTube URLs that were never validated
    #[clap(long, requires = "with_youtube_url_cache_from")]
    pub with_youtube_url_cache_unvalidated: bool,
}

impl From<DownloadArgs> for DownloadOptions {
    fn from(args: DownloadArgs) -> Self {
        DownloadOptions {
            filename: args.filename,
            show_progress: args.show_progress,
            with_youtube_url: args.with_youtube_url,
            youtube_url_cache_from: args.with_youtube_url_cache_from,
            youtube_url_cache_unvalidated: args.with_youtube_url_cache_unvalidated,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("SPOTDUMP_LOG").unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth(args) => match args.command.unwrap_or(AuthCommand::Login) {
            AuthCommand::Login => {
                let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
                cli::auth(Arc::clone(&oauth_result)).await;
            }
            AuthCommand::Logout => cli::logout().await,
            AuthCommand::CurrentUser { show_id, show_url } => {
                cli::current_user(show_id, show_url).await
            }
        },
        Command::Download(args) => cli::download(args.into()).await,
        Command::Playlists(args) => match args.command {
            None => cli::list_playlists().await,
            Some(PlaylistsCommand::Show {
                playlist_id,
                show_url,
                show_artists,
            }) => cli::show_playlist(&playlist_id, show_url, show_artists).await,
        },
        Command::UserTop(args) => match args.command {
            UserTopCommand::Tracks(opt) => {
                cli::top_tracks(opt.limit, opt.offset, opt.time_range).await
            }
            UserTopCommand::Artists(opt) => {
                cli::top_artists(opt.limit, opt.offset, opt.time_range).await
            }
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
