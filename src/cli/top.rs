use crate::{
    cli::require_login,
    error,
    spotify::{SpotifyClient, top},
    types::TimeRange,
    utils,
};

/// Prints the user's top tracks with their artists.
pub async fn top_tracks(limit: u32, offset: u32, time_range: TimeRange) {
    let client = SpotifyClient::new(require_login().await);
    tracing::debug!(limit, offset, time_range = time_range.as_str(), "fetching top tracks");

    let songs = match utils::timed(
        "user-top tracks",
        top::top_tracks(&client, time_range, limit, offset),
    )
    .await
    {
        Ok(songs) => songs,
        Err(e) => error!("Cannot fetch top tracks: {}", e),
    };

    let rows: Vec<Vec<String>> = songs
        .into_iter()
        .map(|song| vec![song.name, song.artists.join(",")])
        .collect();
    for line in utils::pad_columns(&rows) {
        println!("{}", line);
    }
}

/// Prints the names of the user's top artists.
pub async fn top_artists(limit: u32, offset: u32, time_range: TimeRange) {
    let client = SpotifyClient::new(require_login().await);
    tracing::debug!(limit, offset, time_range = time_range.as_str(), "fetching top artists");

    let artists = match utils::timed(
        "user-top artists",
        top::top_artists(&client, time_range, limit, offset),
    )
    .await
    {
        Ok(artists) => artists,
        Err(e) => error!("Cannot fetch top artists: {}", e),
    };

    for artist in artists {
        println!("{}", artist);
    }
}
