use crate::{
    Res,
    catalog::{MISSING_SPOTIFY_URL, PlaylistShell, PlaylistWithSongs, Song},
    spotify::PlaylistSource,
    types::{SimplifiedPlaylist, TrackItem, TrackObject},
};

pub const PLAYLISTS_PAGE_SIZE: u32 = 50;
pub const PLAYLIST_TRACKS_PAGE_SIZE: u32 = 100;
pub const SAVED_TRACKS_PAGE_SIZE: u32 = 50;

pub const LIKED_SONGS_ID: &str = "liked_songs";
pub const LIKED_SONGS_NAME: &str = "Liked Songs";
pub const LIKED_SONGS_URL: &str = "https://open.spotify.com/collection/tracks";

/// Lists the shells of every playlist the current user follows or owns.
pub async fn list_shells<S>(source: &S) -> Res<Vec<PlaylistShell>>
where
    S: PlaylistSource + ?Sized,
{
    let mut shells = Vec::new();
    let mut offset = 0;

    loop {
        let page = source.list_playlists(PLAYLISTS_PAGE_SIZE, offset).await?;
        let has_next = page.has_next();
        let fetched = page.items.len();
        shells.extend(page.items.into_iter().map(shell_from_playlist));

        if !has_next || fetched == 0 {
            break;
        }
        offset += PLAYLISTS_PAGE_SIZE;
    }

    Ok(shells)
}

/// Fetches every page of songs of `shell`.
///
/// The number of songs usually equals `shell.total` but is not checked:
/// removed and regionally unavailable tracks come back as null records and
/// are skipped.
pub async fn materialize<S>(source: &S, shell: &PlaylistShell) -> Res<PlaylistWithSongs>
where
    S: PlaylistSource + ?Sized,
{
    let mut songs = Vec::with_capacity(shell.total as usize);
    let mut offset = 0;

    loop {
        let page = source
            .list_playlist_tracks(&shell.id, PLAYLIST_TRACKS_PAGE_SIZE, offset)
            .await?;
        let has_next = page.has_next();
        let fetched = page.items.len();
        songs.extend(page.items.into_iter().filter_map(song_from_item));

        if !has_next || fetched == 0 {
            break;
        }
        offset += PLAYLIST_TRACKS_PAGE_SIZE;
    }

    Ok(PlaylistWithSongs::new(shell.clone(), songs))
}

/// Fetches the saved tracks library as a pseudo playlist owned by `owner_id`.
pub async fn liked_songs<S>(source: &S, owner_id: &str) -> Res<PlaylistWithSongs>
where
    S: PlaylistSource + ?Sized,
{
    let mut songs = Vec::new();
    let mut total = 0;
    let mut offset = 0;

    loop {
        let page = source
            .list_saved_tracks(SAVED_TRACKS_PAGE_SIZE, offset)
            .await?;
        if offset == 0 {
            total = page.total;
        }
        let has_next = page.has_next();
        let fetched = page.items.len();
        songs.extend(page.items.into_iter().filter_map(song_from_item));

        if !has_next || fetched == 0 {
            break;
        }
        offset += SAVED_TRACKS_PAGE_SIZE;
    }

    let shell = PlaylistShell {
        id: LIKED_SONGS_ID.to_string(),
        name: LIKED_SONGS_NAME.to_string(),
        total,
        external_url: LIKED_SONGS_URL.to_string(),
        owner_id: owner_id.to_string(),
    };

    Ok(PlaylistWithSongs::new(shell, songs))
}

/// Fetches one playlist by id with all of its songs.
///
/// Surrounding whitespace of `playlist_id` is ignored. An empty id or a
/// playlist Spotify does not know are errors.
pub async fn find_playlist<S>(source: &S, playlist_id: &str) -> Res<PlaylistWithSongs>
where
    S: PlaylistSource + ?Sized,
{
    let playlist_id = playlist_id.trim();
    if playlist_id.is_empty() {
        return Err("Invalid playlist id, cannot be empty".into());
    }

    let playlist = source
        .get_playlist(playlist_id)
        .await
        .map_err(|e| format!("Playlist {} could not be found: {}", playlist_id, e))?;

    materialize(source, &shell_from_playlist(playlist)).await
}

fn shell_from_playlist(playlist: SimplifiedPlaylist) -> PlaylistShell {
    PlaylistShell {
        id: playlist.id,
        name: playlist.name,
        total: playlist.tracks.total,
        external_url: playlist.external_urls.spotify.unwrap_or_default(),
        owner_id: playlist.owner.id,
    }
}

fn song_from_item(item: TrackItem) -> Option<Song> {
    item.track.map(song_from_track)
}

pub(crate) fn song_from_track(track: TrackObject) -> Song {
    let artists = track
        .artists
        .unwrap_or_default()
        .into_iter()
        .map(|artist| artist.name)
        .collect();
    let spotify_url = track
        .external_urls
        .and_then(|urls| urls.spotify)
        .unwrap_or_else(|| MISSING_SPOTIFY_URL.to_string());

    Song::new(track.name, artists, spotify_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExternalUrls, TrackArtist};

    #[test]
    fn test_null_track_is_skipped() {
        assert!(song_from_item(TrackItem { track: None }).is_none());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let song = song_from_item(TrackItem {
            track: Some(TrackObject {
                name: "Local File".to_string(),
                artists: None,
                external_urls: Some(ExternalUrls { spotify: None }),
            }),
        })
        .unwrap();

        assert!(song.artists.is_empty());
        assert_eq!(song.spotify_url, MISSING_SPOTIFY_URL);
    }

    #[test]
    fn test_artists_keep_api_order() {
        let song = song_from_item(TrackItem {
            track: Some(TrackObject {
                name: "Under Pressure".to_string(),
                artists: Some(vec![
                    TrackArtist {
                        name: "Queen".to_string(),
                    },
                    TrackArtist {
                        name: "David Bowie".to_string(),
                    },
                ]),
                external_urls: Some(ExternalUrls {
                    spotify: Some("https://open.spotify.com/track/2fuCquhmrzHpu5xcA1ci9x".to_string()),
                }),
            }),
        })
        .unwrap();

        assert_eq!(song.artists, vec!["Queen", "David Bowie"]);
        assert_eq!(
            song.spotify_url,
            "https://open.spotify.com/track/2fuCquhmrzHpu5xcA1ci9x"
        );
    }
}
