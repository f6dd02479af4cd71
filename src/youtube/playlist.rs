use reqwest::Client;
use serde_json::json;

use crate::{
    config,
    types::{CreateYtPlaylistResponse, YtPlaylistItemsResponse},
};

/// Creates a private destination playlist and returns its ID.
pub async fn create(name: &str, token: &str) -> Result<String, reqwest::Error> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/playlists?part=snippet,status",
        uri = &config::youtube_apiurl()
    );

    let body = json!({
        "snippet": {
            "title": name,
            "description": "Migrated from Spotify"
        },
        "status": {
            "privacyStatus": "private"
        }
    });

    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;
    let json = response.json::<CreateYtPlaylistResponse>().await?;

    Ok(json.id)
}

/// Returns the video IDs currently present in a playlist.
///
/// Pages through `playlistItems` 50 at a time. The orchestrator uses the
/// result to keep adds idempotent.
pub async fn items(playlist_id: &str, token: &str) -> Result<Vec<String>, reqwest::Error> {
    let client = Client::new();
    let mut video_ids: Vec<String> = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let mut api_url = format!(
            "{uri}/playlistItems?part=contentDetails&playlistId={id}&maxResults=50",
            uri = &config::youtube_apiurl(),
            id = playlist_id
        );
        if let Some(ref page) = page_token {
            api_url.push_str(&format!("&pageToken={}", page));
        }

        let response = client
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;
        let json = response.json::<YtPlaylistItemsResponse>().await?;

        video_ids.extend(json.items.into_iter().map(|i| i.content_details.video_id));

        match json.next_page_token {
            Some(next) => page_token = Some(next),
            None => break,
        }
    }

    Ok(video_ids)
}

/// Appends a video to a playlist.
pub async fn add_track(playlist_id: &str, video_id: &str, token: &str) -> Result<(), reqwest::Error> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/playlistItems?part=snippet",
        uri = &config::youtube_apiurl()
    );

    let body = json!({
        "snippet": {
            "playlistId": playlist_id,
            "resourceId": {
                "kind": "youtube#video",
                "videoId": video_id
            }
        }
    });

    client
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;

    Ok(())
}
