use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    catalog::Song,
    cli::require_login,
    error, info,
    spotify::{SpotifyClient, playlists},
    types::PlaylistTableRow,
    utils,
};

/// Prints the user's playlists as a table.
pub async fn list_playlists() {
    let client = SpotifyClient::new(require_login().await);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let shells = match playlists::list_shells(&client).await {
        Ok(shells) => shells,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot fetch playlists: {}", e);
        }
    };
    pb.finish_and_clear();

    let total_songs: u64 = shells.iter().map(|s| s.total).sum();
    let rows: Vec<PlaylistTableRow> = shells
        .into_iter()
        .map(|s| PlaylistTableRow {
            name: s.name,
            songs: s.total,
            owner: s.owner_id,
            url: s.external_url,
        })
        .collect();
    let count = rows.len();

    println!("{}", Table::new(rows));
    info!("{} playlists with {} songs", count, total_songs);
}

/// Prints the songs of one playlist, one per line.
pub async fn show_playlist(playlist_id: &str, show_url: bool, show_artists: bool) {
    let client = SpotifyClient::new(require_login().await);

    let playlist = match utils::timed(
        "playlists show",
        playlists::find_playlist(&client, playlist_id),
    )
    .await
    {
        Ok(playlist) => playlist,
        Err(e) => error!("{}", e),
    };

    for line in song_lines(&playlist.songs, show_artists, show_url) {
        println!("{}", line);
    }
}

fn song_lines(songs: &[Song], show_artists: bool, show_url: bool) -> Vec<String> {
    let rows: Vec<Vec<String>> = songs
        .iter()
        .map(|song| {
            let mut row = vec![song.name.clone()];
            if show_artists {
                row.push(song.artists.join(","));
            }
            if show_url {
                row.push(song.spotify_url.clone());
            }
            row
        })
        .collect();

    utils::pad_columns(&rows)
}
