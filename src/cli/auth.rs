use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    server::start_api_server,
    spotify,
    types::{AuthSession, Service},
    youtube,
};

pub async fn auth(service: Option<Service>, shared_state: Arc<Mutex<Option<AuthSession>>>) {
    // one callback server serves both flows
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    let services = match service {
        Some(service) => vec![service],
        None => vec![Service::Spotify, Service::Youtube],
    };

    for service in services {
        match service {
            Service::Spotify => spotify::auth::auth(Arc::clone(&shared_state)).await,
            Service::Youtube => youtube::auth::auth(Arc::clone(&shared_state)).await,
        }
    }
}
