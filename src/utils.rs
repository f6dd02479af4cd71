use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::DateTime;
use once_cell::sync::Lazy;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::types::{AuthSession, Token};

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

static ISO8601_DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$").unwrap());

/// Parses a YouTube `contentDetails.duration` value like `PT4M33S` into
/// seconds. Returns `None` for anything that doesn't look like an ISO 8601
/// duration.
pub fn parse_iso8601_duration(value: &str) -> Option<u32> {
    let caps = ISO8601_DURATION.captures(value)?;

    let part = |i: usize| -> u32 {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };

    let days = part(1);
    let hours = part(2);
    let minutes = part(3);
    let seconds = part(4);

    Some(days * 86400 + hours * 3600 + minutes * 60 + seconds)
}

/// Waits for the OAuth callback to complete and return a token.
///
/// Polls the shared session state for a completed token exchange with a
/// 60-second timeout. Runs concurrently with the callback handler that
/// populates the token; used by both the Spotify and the YouTube flow.
pub async fn wait_for_token(shared_state: Arc<Mutex<Option<AuthSession>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(session) = lock.as_ref() {
            if let Some(token) = &session.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

pub fn format_timestamp(ts: u64) -> String {
    if ts == 0 {
        return "never".to_string();
    }

    match DateTime::from_timestamp(ts as i64, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "invalid".to_string(),
    }
}
