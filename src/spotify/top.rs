use crate::{
    Res,
    catalog::Song,
    spotify::{PlaylistSource, playlists::song_from_track},
    types::TimeRange,
};

/// Largest page Spotify serves for top items.
pub const TOP_ITEMS_MAX_LIMIT: u32 = 50;

/// The user's most played tracks, best first. One page only.
pub async fn top_tracks<S>(
    source: &S,
    time_range: TimeRange,
    limit: u32,
    offset: u32,
) -> Res<Vec<Song>>
where
    S: PlaylistSource + ?Sized,
{
    let page = source
        .top_tracks(time_range, limit.clamp(1, TOP_ITEMS_MAX_LIMIT), offset)
        .await?;
    Ok(page.items.into_iter().map(song_from_track).collect())
}

/// Names of the user's most played artists, best first. One page only.
pub async fn top_artists<S>(
    source: &S,
    time_range: TimeRange,
    limit: u32,
    offset: u32,
) -> Res<Vec<String>>
where
    S: PlaylistSource + ?Sized,
{
    let page = source
        .top_artists(time_range, limit.clamp(1, TOP_ITEMS_MAX_LIMIT), offset)
        .await?;
    Ok(page.items.into_iter().map(|artist| artist.name).collect())
}
