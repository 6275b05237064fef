use crate::{error, management::TokenManager};

/// Loads the persisted session or exits with status 1.
///
/// Every command that talks to Spotify calls this first.
pub async fn require_login() -> TokenManager {
    match TokenManager::load().await {
        Ok(token_mgr) => token_mgr,
        Err(e) => error!(
            "Not logged in. Please run {} auth ({})",
            env!("CARGO_PKG_NAME"),
            e
        ),
    }
}
