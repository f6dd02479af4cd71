//! # API Module
//!
//! This module provides the HTTP endpoints served by the local OAuth
//! callback server. Both the Spotify and the YouTube authorization flows
//! redirect the user's browser back to this server, which completes the
//! token exchange for whichever flow is in progress.
//!
//! ## Endpoints
//!
//! - [`callback`] - Handles the OAuth redirect. Reads the active
//!   [`crate::types::AuthSession`] from the shared state to decide whether
//!   the authorization code has to be exchanged against Spotify (PKCE) or
//!   Google (client secret), then stores the resulting token back into the
//!   session for the waiting CLI flow to pick up.
//! - [`health`] - Returns application status and version for quick checks
//!   that the callback server is up.
//!
//! ## Architecture
//!
//! Built on [Axum](https://docs.rs/axum); the shared session state is an
//! `Arc<Mutex<Option<AuthSession>>>` injected as an extension layer. Only
//! one authorization flow is active at a time, so a single slot suffices.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
