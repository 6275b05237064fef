use std::path::Path;

use spotdump::{
    catalog::{self, PlaylistShell, PlaylistWithSongs, Song},
    management::LookupCache,
};
use tempfile::TempDir;

fn song(url: &str, youtube_url: Option<&str>, validated: bool) -> Song {
    let mut song = Song::new(format!("song {url}"), vec!["artist".to_string()], url);
    song.youtube_url = youtube_url.map(str::to_string);
    song.youtube_url_validated = validated;
    song
}

fn playlist(id: &str, songs: Vec<Song>) -> PlaylistWithSongs {
    PlaylistWithSongs::new(
        PlaylistShell {
            id: id.to_string(),
            name: id.to_string(),
            total: songs.len() as u64,
            external_url: format!("https://open.spotify.com/playlist/{id}"),
            owner_id: "owner".to_string(),
        },
        songs,
    )
}

async fn write(dir: &TempDir, playlists: &[PlaylistWithSongs]) -> std::path::PathBuf {
    let path = dir.path().join("previous.json");
    catalog::write_document(&path, playlists).await.unwrap();
    path
}

#[tokio::test]
async fn test_preload_single_validated_song() {
    let dir = TempDir::new().unwrap();
    let json = r#"[{"id":"p","name":"p","total":1,"external_url":"u","owner_spotify_id":"o",
        "songs":[{"name":"n","artists":["a"],"spotify_url":"https://example.invalid",
        "youtube_url":"https://service/watch?v=wxyz","youtube_url_validated":true}]}]"#;
    let path = dir.path().join("previous.json");
    std::fs::write(&path, json).unwrap();

    let cache = LookupCache::new();
    assert_eq!(cache.preload(&path, false).await.unwrap(), 1);

    let entry = cache.lookup("https://example.invalid").await.unwrap();
    assert_eq!(entry.youtube_url.as_deref(), Some("https://service/watch?v=wxyz"));
    assert!(entry.validated);
}

#[tokio::test]
async fn test_preload_only_reads_song_match_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("previous.json");
    std::fs::write(
        &path,
        r#"[{"songs":[{"spotify_url":"s","youtube_url":"y","youtube_url_validated":true}]}]"#,
    )
    .unwrap();

    let cache = LookupCache::new();
    assert_eq!(cache.preload(&path, false).await.unwrap(), 1);
}

#[tokio::test]
async fn test_preload_filter_law() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        &[
            playlist(
                "a",
                vec![
                    song("validated", Some("https://music.youtube.com/watch?v=1"), true),
                    song("unvalidated", Some("https://music.youtube.com/watch?v=2"), false),
                ],
            ),
            playlist("b", vec![song("unmatched", None, false)]),
        ],
    )
    .await;

    let strict = LookupCache::new();
    strict.preload(&path, false).await.unwrap();
    assert!(strict.lookup("validated").await.is_some());
    assert!(strict.lookup("unvalidated").await.is_none());
    assert!(strict.lookup("unmatched").await.is_none());

    let lenient = LookupCache::new();
    lenient.preload(&path, true).await.unwrap();
    let entry = lenient.lookup("unvalidated").await.unwrap();
    assert!(!entry.validated);
    assert!(lenient.lookup("validated").await.unwrap().validated);
    assert!(lenient.lookup("unmatched").await.is_none());
    assert_eq!(lenient.len().await, 2);
}

#[tokio::test]
async fn test_document_round_trip_preserves_match_triples() {
    let dir = TempDir::new().unwrap();
    let playlists = vec![
        playlist(
            "a",
            vec![
                song("s1", Some("https://music.youtube.com/watch?v=1"), true),
                song("s2", None, false),
            ],
        ),
        playlist("b", vec![song("s3", Some("https://music.youtube.com/watch?v=3"), false)]),
        playlist("empty", Vec::new()),
    ];
    let path = write(&dir, &playlists).await;

    let read = catalog::read_document(&path).await.unwrap();

    assert_eq!(read.len(), playlists.len());
    for (original, loaded) in playlists.iter().zip(&read) {
        assert_eq!(original.songs.len(), loaded.songs.len());
        for (a, b) in original.songs.iter().zip(&loaded.songs) {
            assert_eq!(
                (&a.spotify_url, &a.youtube_url, a.youtube_url_validated),
                (&b.spotify_url, &b.youtube_url, b.youtube_url_validated)
            );
        }
    }
    assert_eq!(read, playlists);
}

#[tokio::test]
async fn test_preload_missing_file_fails() {
    let cache = LookupCache::new();
    assert!(cache.preload(Path::new("no-such-file.json"), true).await.is_err());
}
