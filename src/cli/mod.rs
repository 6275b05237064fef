//! # CLI Module
//!
//! User-facing commands of spotdump. Each command checks its preconditions
//! explicitly, delegates to the library, and is the only place where errors
//! turn into `[!] ERROR: ...` output and a non-zero exit status.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the Spotify OAuth PKCE flow and stores the session
//! - [`logout`] - Deletes the stored session
//! - [`current_user`] - Shows who is logged in
//! - [`download`] - Writes all playlists and liked songs to a JSON file,
//!   optionally matched with YouTube Music
//! - [`list_playlists`] - Shows the user's playlists as a table
//! - [`show_playlist`] - Lists the songs of one playlist
//! - [`top_tracks`], [`top_artists`] - The user's most played items
//!
//! ## Preconditions
//!
//! [`require_login`] is called at the top of every command that talks to
//! Spotify. Without a session file the command exits with status 1 before
//! any request is made.
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotdump auth
//! spotdump auth current-user --show-id
//! spotdump playlists
//! spotdump playlists show --playlist-id 37i9dQZF1DXcBWIGoYBM5M --show-artists
//! spotdump user-top tracks --limit 20 --time-range long_term
//! spotdump download --show-progress
//! spotdump download --filename library.json --with-youtube-url
//! spotdump download --with-youtube-url --with-youtube-url-cache-from library.json
//! ```

mod auth;
mod download;
mod playlists;
mod session;
mod top;

pub use auth::auth;
pub use auth::current_user;
pub use auth::logout;
pub use download::download;
pub use playlists::list_playlists;
pub use playlists::show_playlist;
pub use session::require_login;
pub use top::top_artists;
pub use top::top_tracks;
