use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    cli::require_login,
    error,
    management::TokenManager,
    spotify::{self, PlaylistSource, SpotifyClient},
    success,
    types::{CurrentUser, PkceToken},
};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    match spotify::auth::auth(shared_state).await {
        Ok(()) => success!("Authentication successful!"),
        Err(e) => error!("{}", e),
    }
}

/// Deletes the stored session.
pub async fn logout() {
    require_login().await;

    match TokenManager::logout().await {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "logged out");
            success!("Logout successful!");
        }
        Err(e) => error!("{}", e),
    }
}

/// Prints the display name of the logged in user, optionally followed by
/// the user id and profile URL.
pub async fn current_user(show_id: bool, show_url: bool) {
    let client = SpotifyClient::new(require_login().await);

    match client.current_user().await {
        Ok(user) => println!("{}", user_line(&user, show_id, show_url)),
        Err(e) => error!("Cannot fetch current user: {}", e),
    }
}

fn user_line(user: &CurrentUser, show_id: bool, show_url: bool) -> String {
    let mut line = user.display_name.clone().unwrap_or_else(|| user.id.clone());
    if show_id {
        line.push('\t');
        line.push_str(&user.id);
    }
    if show_url {
        line.push('\t');
        line.push_str(user.external_urls.spotify.as_deref().unwrap_or_default());
    }
    line
}
