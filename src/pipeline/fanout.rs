use std::sync::Arc;

use indicatif::ProgressBar;
use tokio::sync::Semaphore;

use crate::{
    Res,
    catalog::{PlaylistShell, PlaylistWithSongs},
    spotify::{PlaylistSource, playlists},
};

/// Concurrent playlist fetches. Kept low for Spotify's rate limits.
pub const CONTENT_CONCURRENCY: usize = 3;

/// Materializes every shell with at most `concurrency` fetches in flight and
/// appends the liked songs playlist last.
///
/// `result[i]` always belongs to `shells[i]` no matter which fetch finishes
/// first. The progress bar counts `shells.len() + 1` units. The first failing
/// fetch aborts the remaining ones and is returned.
pub async fn fetch_contents<S>(
    source: Arc<S>,
    shells: Vec<PlaylistShell>,
    owner_id: &str,
    concurrency: usize,
    pb: &ProgressBar,
) -> Res<Vec<PlaylistWithSongs>>
where
    S: PlaylistSource + ?Sized + 'static,
{
    pb.set_length(shells.len() as u64 + 1);
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let mut handles = Vec::with_capacity(shells.len());
    for shell in shells {
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        let pb = pb.clone();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let playlist = playlists::materialize(source.as_ref(), &shell).await?;
            tracing::debug!(playlist = %shell.name, songs = playlist.songs.len(), "fetched playlist");
            pb.inc(1);
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(playlist)
        }));
    }

    let mut contents = Vec::with_capacity(handles.len() + 1);
    let mut pending = handles.into_iter();
    while let Some(handle) = pending.next() {
        let result = match handle.await {
            Ok(result) => result,
            Err(join_err) => Err(join_err.into()),
        };

        match result {
            Ok(playlist) => contents.push(playlist),
            Err(e) => {
                for rest in pending {
                    rest.abort();
                }
                return Err(e);
            }
        }
    }

    contents.push(playlists::liked_songs(source.as_ref(), owner_id).await?);
    pb.inc(1);

    Ok(contents)
}
