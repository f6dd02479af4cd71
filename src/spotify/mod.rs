//! # Spotify Integration Module
//!
//! This module provides the source-catalog side of the migration: reading
//! the user's playlists and tracks from the Spotify Web API, plus the OAuth
//! authentication flow required to do so. It handles HTTP communication,
//! pagination, rate limiting and token exchange, and exposes the results as
//! the typed structures the matching engine consumes.
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: verifier/challenge generation, browser
//!   launch, code exchange and token refresh. PKCE avoids storing a client
//!   secret for a desktop application.
//! - [`playlists`] - Playlist and track retrieval with `next`-URL
//!   pagination. Local files and unavailable tracks (which come back without
//!   an ID) are filtered out before matching.
//! - [`catalog`] - The [`crate::migrate::SourceCatalog`] implementation
//!   wrapping the two modules above behind a cached, self-refreshing token.
//!
//! ## Error Handling
//!
//! - 429 Too Many Requests responses are honored via the `Retry-After`
//!   header; abnormal delays (> 120 seconds) are surfaced as a warning.
//! - 502 Bad Gateway responses are retried after a fixed delay.
//! - Other HTTP and network errors are propagated to the caller, where the
//!   orchestrator records them per track or aborts the playlist.
//!
//! ## API Coverage
//!
//! - `GET /me/playlists` - the user's playlists, paginated
//! - `GET /playlists/{id}` - playlist metadata
//! - `GET /playlists/{id}/tracks` - playlist tracks, paginated
//! - `POST /api/token` - token exchange and refresh

pub mod auth;
pub mod catalog;
pub mod playlists;

pub use catalog::SpotifyCatalog;
