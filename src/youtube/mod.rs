//! # YouTube Integration Module
//!
//! This module provides the destination-catalog side of the migration:
//! searching for tracks, creating playlists and adding videos through the
//! YouTube Data API v3, plus the Google OAuth flow required to do so.
//!
//! ## Core Modules
//!
//! - [`auth`] - Authorization-code flow against Google's OAuth endpoints.
//!   Unlike Spotify's PKCE flow this one requires the client secret on
//!   token exchange, and Google omits the refresh token from refresh
//!   responses, so the previous one is carried over.
//! - [`search`] - Music-category video search returning ranked
//!   [`crate::types::MatchCandidate`] lists with durations resolved via a
//!   follow-up `videos` lookup.
//! - [`playlist`] - Playlist creation, item listing and item insertion.
//! - [`catalog`] - The [`crate::migrate::DestinationCatalog`] implementation
//!   combining the modules above with the request pacer, so every call
//!   respects the API quota.
//!
//! ## API Coverage
//!
//! - `GET /search` - ranked track candidates (music category)
//! - `GET /videos` - candidate durations via `contentDetails`
//! - `POST /playlists` - create a private destination playlist
//! - `GET /playlistItems` - current playlist contents, paginated
//! - `POST /playlistItems` - add a matched video

pub mod auth;
pub mod catalog;
pub mod playlist;
pub mod search;

pub use catalog::YoutubeCatalog;
