use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    types::{
        GetUserPlaylistsResponse, PlaylistDetail, PlaylistInfoResponse, PlaylistTracksResponse,
        SourcePlaylist, Track,
    },
    warning,
};

/// Retrieves all playlists of the current user from the Spotify Web API.
///
/// Follows the `next` URL in each response page until the full list has been
/// fetched. Requires the playlist read scopes granted during authentication.
pub async fn get_user_playlists(token: &str) -> Result<Vec<SourcePlaylist>, reqwest::Error> {
    let mut playlists: Vec<SourcePlaylist> = Vec::new();
    let mut api_url = format!(
        "{uri}/me/playlists?limit=50",
        uri = &config::spotify_apiurl()
    );

    loop {
        let response = get_with_retry(&api_url, token).await?;
        let json = response.json::<GetUserPlaylistsResponse>().await?;
        playlists.extend(json.items);

        match json.next {
            Some(next) => api_url = next,
            None => break,
        }
    }

    Ok(playlists)
}

/// Retrieves a playlist's name and its full track list.
///
/// Tracks are paginated 100 at a time. Items without a track or without a
/// track ID (local files, tracks removed from the catalog) are dropped, the
/// first listed artist is used for matching, and the duration is converted
/// to whole seconds with zero meaning "unknown".
pub async fn get_playlist(playlist_id: &str, token: &str) -> Result<PlaylistDetail, reqwest::Error> {
    let info_url = format!(
        "{uri}/playlists/{id}?fields=name",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );
    let response = get_with_retry(&info_url, token).await?;
    let info = response.json::<PlaylistInfoResponse>().await?;

    let mut tracks: Vec<Track> = Vec::new();
    let mut api_url = format!(
        "{uri}/playlists/{id}/tracks?limit=100",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    loop {
        let response = get_with_retry(&api_url, token).await?;
        let json = response.json::<PlaylistTracksResponse>().await?;

        for item in json.items {
            let Some(track) = item.track else { continue };
            let Some(id) = track.id else { continue };

            let artist = track
                .artists
                .first()
                .map(|a| a.name.clone())
                .unwrap_or_default();

            tracks.push(Track {
                id,
                artist,
                title: track.name,
                duration_secs: (track.duration_ms.unwrap_or(0) / 1000) as u32,
            });
        }

        match json.next {
            Some(next) => api_url = next,
            None => break,
        }
    }

    Ok(PlaylistDetail {
        name: info.name,
        tracks,
    })
}

async fn get_with_retry(api_url: &str, token: &str) -> Result<reqwest::Response, reqwest::Error> {
    loop {
        let client = Client::new();
        let response = client.get(api_url).bearer_auth(token).send().await?;

        // check for retry-after header
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            if let Some(retry_after) = response.headers().get("retry-after") {
                let retry_after = retry_after
                    .to_str()
                    .unwrap_or("0")
                    .parse::<u64>()
                    .unwrap_or(0);
                if retry_after <= 120 {
                    sleep(Duration::from_secs(retry_after)).await;
                    continue;
                } else {
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds. Try again tomorrow.",
                        retry_after
                    );
                }
            }
        }

        match response.error_for_status() {
            Ok(valid_response) => return Ok(valid_response),
            Err(err) => {
                if let Some(status) = err.status() {
                    if status == StatusCode::BAD_GATEWAY {
                        sleep(Duration::from_secs(10)).await;
                        continue; // retry
                    }
                }

                return Err(err); // propagate other errors
            }
        }
    }
}
