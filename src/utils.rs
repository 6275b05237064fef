use std::{future::Future, time::Instant};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, TimeZone};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Builds `playlists-{user_id}-{timestamp}.json`.
///
/// The timestamp avoids `:` so the name is valid on every platform.
pub fn default_filename<Tz>(user_id: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "playlists-{user_id}-{timestamp}.json",
        user_id = user_id,
        timestamp = now.format("%Y-%m-%dT%H-%M-%S")
    )
}

/// A user supplied output filename must be non-blank and end in `.json`.
pub fn validate_filename(filename: &str) -> Result<(), String> {
    if filename.trim().is_empty() {
        return Err("Filename must not be empty".to_string());
    }
    if !filename.trim().ends_with(".json") {
        return Err(format!("Filename {} must end with .json", filename.trim()));
    }
    Ok(())
}

/// Text query used to find a song on YouTube: `"{name} by {a}, {b}"`.
pub fn search_query(name: &str, artists: &[String]) -> String {
    format!("{} by {}", name, artists.join(", "))
}

/// Lays out rows as tab separated columns, each padded to its widest cell.
/// Trailing padding of the last column is dropped.
pub fn pad_columns(rows: &[Vec<String>]) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    rows.iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join("\t")
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Awaits `fut` and logs how long it took.
pub async fn timed<F, T>(label: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    tracing::info!(
        operation = label,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "finished {}",
        label
    );
    out
}
