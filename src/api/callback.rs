use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{
    spotify,
    types::{AuthSession, Service},
    warning, youtube,
};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthSession>>>>,
) -> Html<&'static str> {
    if let Some(code) = params.get("code") {
        let mut state = shared_state.lock().await;
        let Some(ref mut session) = state.as_mut() else {
            return Html("<h4>No authorization flow in progress.</h4>");
        };

        let verifier = session.code_verifier.clone();

        let exchanged = match session.service {
            Service::Spotify => spotify::auth::exchange_code_pkce(code, &verifier).await,
            Service::Youtube => youtube::auth::exchange_code(code).await,
        };

        match exchanged {
            Ok(token) => {
                session.token = Some(token);
                Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
            }
            Err(e) => {
                warning!("Token exchange failed: {}", e);
                Html("<h4>Login failed.</h4>")
            }
        }
    } else {
        Html("<h4>Missing authorization code.</h4>")
    }
}
