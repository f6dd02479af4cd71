use reqwest::Client;

use crate::{
    config,
    types::{MatchCandidate, SearchResponse, VideosResponse},
    utils,
};

/// Number of search results considered per track.
const SEARCH_LIMIT: u32 = 5;

/// YouTube's video category for music.
const MUSIC_CATEGORY_ID: u32 = 10;

/// Searches YouTube for a track and returns candidates in API ranking order.
///
/// Runs a music-category video search for "artist title" and resolves the
/// candidate durations with a follow-up `videos` lookup, since the search
/// endpoint does not expose `contentDetails`. Candidates whose duration
/// cannot be resolved keep a duration of zero and fail the duration check
/// against any track with a known duration.
pub async fn search_tracks(
    artist: &str,
    title: &str,
    token: &str,
) -> Result<Vec<MatchCandidate>, reqwest::Error> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/search?part=snippet&type=video&videoCategoryId={category}&maxResults={limit}",
        uri = &config::youtube_apiurl(),
        category = MUSIC_CATEGORY_ID,
        limit = SEARCH_LIMIT,
    );

    let query = format!("{} {}", artist, title);
    let response = client
        .get(&api_url)
        .query(&[("q", query.as_str())])
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;
    let json = response.json::<SearchResponse>().await?;

    let mut candidates: Vec<MatchCandidate> = json
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id?;
            // auto-generated music channels are named "<artist> - Topic"
            let artist = item
                .snippet
                .channel_title
                .trim_end_matches(" - Topic")
                .to_string();
            Some(MatchCandidate {
                video_id,
                artist,
                title: item.snippet.title,
                duration_secs: 0,
            })
        })
        .collect();

    if candidates.is_empty() {
        return Ok(candidates);
    }

    let ids = candidates
        .iter()
        .map(|c| c.video_id.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let videos_url = format!(
        "{uri}/videos?part=contentDetails&id={ids}",
        uri = &config::youtube_apiurl(),
        ids = ids
    );

    let response = client
        .get(&videos_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;
    let videos = response.json::<VideosResponse>().await?;

    for candidate in candidates.iter_mut() {
        if let Some(video) = videos.items.iter().find(|v| v.id == candidate.video_id) {
            candidate.duration_secs =
                utils::parse_iso8601_duration(&video.content_details.duration).unwrap_or(0);
        }
    }

    Ok(candidates)
}
