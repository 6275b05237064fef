use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{Res, config, spotify, types::Token};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Owns the persisted Spotify session.
///
/// The session file doubles as the "logged in" marker: commands that talk to
/// Spotify refuse to run when it cannot be loaded.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Res<Self> {
        let content = async_fs::read_to_string(Self::token_path()).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Res<()> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Deletes the session file. Returns the path that was removed.
    pub async fn logout() -> Res<PathBuf> {
        let path = Self::token_path();
        remove_session(&path).await?;
        Ok(path)
    }

    /// Returns an access token, refreshing and persisting it first when it is
    /// about to expire. A failed refresh keeps the old token so the API
    /// reports the authorization problem.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            match spotify::auth::refresh_token(&self.token.refresh_token).await {
                Ok(mut new_token) => {
                    // Spotify does not always rotate the refresh token.
                    if new_token.refresh_token.is_empty() {
                        new_token.refresh_token = self.token.refresh_token.clone();
                    }
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        tracing::warn!("failed to persist refreshed token: {}", e);
                    }
                }
                Err(e) => tracing::warn!("token refresh failed: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }
}

async fn remove_session(path: &Path) -> Res<()> {
    async_fs::remove_file(path)
        .await
        .map_err(|e| format!("Cannot remove session file {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "session file removed");
    Ok(())
}
