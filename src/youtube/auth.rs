use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config, error,
    management::TokenManager,
    success,
    types::{AuthSession, Service, Token},
    utils, warning,
};

/// Runs the authorization-code flow against Google's OAuth endpoints.
///
/// Stores the session in the shared callback state, opens the authorization
/// URL in the user's browser and waits for the local callback server to
/// complete the token exchange. `access_type=offline` and `prompt=consent`
/// make sure a refresh token is issued.
pub async fn auth(shared_state: Arc<Mutex<Option<AuthSession>>>) {
    let auth_url = format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&access_type=offline&prompt=consent",
        auth_url = &config::youtube_apiauth_url(),
        client_id = &config::youtube_client_id(),
        redirect_uri = &config::youtube_redirect_uri(),
        scope = &config::youtube_scope()
    );

    {
        let mut lock = shared_state.lock().await;
        *lock = Some(AuthSession {
            service: Service::Youtube,
            code_verifier: String::new(),
            token: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = utils::wait_for_token(shared_state).await;

    match token {
        Some(t) => {
            let token_manager = TokenManager::new(Service::Youtube, t.clone());
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("YouTube authentication successful!");
        }
        None => {
            error!("YouTube authentication failed or timed out.");
        }
    }
}

/// Refreshes an expired YouTube access token using a refresh token.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let client = Client::new();
    let res = client
        .post(&config::youtube_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &config::youtube_client_id()),
            ("client_secret", &config::youtube_client_secret()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let json: Value = res.json().await.map_err(|e| e.to_string())?;

    Ok(Token {
        access_token: json["access_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        // Google does not return the refresh token again; keep the one we have
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or(refresh_token)
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Exchanges an authorization code for an access token.
///
/// Called from the callback handler once Google redirects back with the
/// code.
pub async fn exchange_code(code: &str) -> Result<Token, reqwest::Error> {
    let client_id = &config::youtube_client_id();
    let client_secret = &config::youtube_client_secret();
    let redirect_uri = &config::youtube_redirect_uri();

    let client = Client::new();
    let res = client
        .post(&config::youtube_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ])
        .send()
        .await?;

    let json: Value = res.json().await?;

    Ok(Token {
        access_token: json["access_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
