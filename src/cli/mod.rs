//! # CLI Module
//!
//! This module provides the command-line interface layer for the playlist
//! migrator. It implements all user-facing commands and coordinates between
//! the API clients, the migration engine and the persisted state.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Runs the OAuth flows for Spotify (PKCE) and YouTube
//!   (authorization code), sharing one local callback server.
//!
//! ### Playlist Operations
//!
//! - [`playlists`] - Lists the user's Spotify playlists with their IDs, so
//!   a single playlist can be picked for migration.
//! - [`migrate`] - Migrates one playlist or all of them, resolving each
//!   track against YouTube and recording the outcome in the ledger.
//!
//! ### Information Commands
//!
//! - [`info`] - Shows the migration ledger state: per-playlist match counts
//!   and when each playlist was last migrated.
//!
//! ## Architecture Design
//!
//! The CLI layer wires concrete catalogs into the engine and handles user
//! interaction, progress feedback and error presentation:
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Migration Engine (matching + ledger)
//!     ↓
//! API Layer (Spotify / YouTube)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! ## Error Handling Philosophy
//!
//! - Track-level failures are recorded and reported, never fatal.
//! - Playlist-level failures abort that playlist; batch mode continues and
//!   exits non-zero at the end.
//! - Ledger failures terminate the process immediately, since progress
//!   tracking can no longer be trusted.

mod auth;
mod info;
mod migrate;
mod playlists;

pub use auth::auth;
pub use info::info;
pub use migrate::migrate;
pub use playlists::playlists;
