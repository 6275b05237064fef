mod common;

use common::{MockSource, USER_ID, track, tracks};
use spotdump::{
    spotify::{
        playlists,
        top::{self, TOP_ITEMS_MAX_LIMIT},
    },
    types::TimeRange,
};

#[tokio::test]
async fn test_find_playlist_returns_shell_and_songs() {
    let source = MockSource::new()
        .with_playlist("other", tracks("other", 2))
        .with_playlist("mix", tracks("mix", 130));

    let playlist = playlists::find_playlist(&source, "  mix ").await.unwrap();

    assert_eq!(playlist.shell.id, "mix");
    assert_eq!(playlist.shell.owner_id, USER_ID);
    assert_eq!(playlist.songs.len(), 130);
    assert_eq!(playlist.songs[0].name, "mix song 0");
}

#[tokio::test]
async fn test_find_playlist_rejects_blank_id() {
    let source = MockSource::new().with_playlist("mix", tracks("mix", 1));

    let err = playlists::find_playlist(&source, "   ").await.unwrap_err();

    assert!(err.to_string().contains("cannot be empty"));
}

#[tokio::test]
async fn test_find_playlist_reports_unknown_id() {
    let source = MockSource::new().with_playlist("mix", tracks("mix", 1));

    let err = playlists::find_playlist(&source, "nope").await.unwrap_err();

    assert!(err.to_string().contains("Playlist nope could not be found"));
}

#[tokio::test]
async fn test_top_tracks_map_to_songs() {
    let source = MockSource::new().with_top_tracks(vec![
        track("Under Pressure", &["Queen", "David Bowie"], "https://open.spotify.com/track/u"),
        track("Heroes", &["David Bowie"], "https://open.spotify.com/track/h"),
        track("Starman", &["David Bowie"], "https://open.spotify.com/track/s"),
    ]);

    let songs = top::top_tracks(&source, TimeRange::ShortTerm, 2, 1)
        .await
        .unwrap();

    assert_eq!(songs.len(), 2);
    assert_eq!(songs[0].name, "Heroes");
    assert_eq!(songs[1].spotify_url, "https://open.spotify.com/track/s");
    assert_eq!(
        source.top_requests.lock().unwrap().as_slice(),
        &[(TimeRange::ShortTerm, 2, 1)]
    );
}

#[tokio::test]
async fn test_top_artists_clamp_limit() {
    let source = MockSource::new().with_top_artists(&["Queen", "David Bowie"]);

    let artists = top::top_artists(&source, TimeRange::default(), 500, 0)
        .await
        .unwrap();

    assert_eq!(artists, vec!["Queen", "David Bowie"]);
    assert_eq!(
        source.top_requests.lock().unwrap().as_slice(),
        &[(TimeRange::MediumTerm, TOP_ITEMS_MAX_LIMIT, 0)]
    );
}

