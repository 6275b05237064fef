//! # API Module
//!
//! HTTP endpoints of the short-lived local server that runs during
//! `spotdump auth`.
//!
//! - [`callback`] - Receives the authorization code from Spotify's
//!   authorization server and exchanges it, together with the PKCE code
//!   verifier, for an access token.
//! - [`health`] - Reports that the server is up.
//!
//! The endpoints are plain [Axum](https://docs.rs/axum) handlers wired up in
//! [`crate::server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
