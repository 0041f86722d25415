//! Application state management

use std::sync::Arc;

use tracing::info;

use crate::authn::session::SessionStore;
use crate::errors::ConsoleError;
use crate::http::client::HttpClient;
use crate::storage::layout::StorageLayout;
use crate::storage::settings::Settings;

/// State shared by every command
pub struct AppState {
    pub settings: Settings,

    pub layout: StorageLayout,

    /// HTTP client for backend communication
    pub http_client: Arc<HttpClient>,

    /// Signed-in session
    pub session: Arc<SessionStore<HttpClient>>,
}

impl AppState {
    pub fn init(settings: Settings, layout: StorageLayout) -> Result<Self, ConsoleError> {
        info!("Using API at {}", settings.backend.base_url);
        if settings.session.token.is_none() {
            info!("No session token configured; requests are sent unauthenticated");
        }

        let http_client = Arc::new(HttpClient::new(&settings.client_options())?);
        let session = Arc::new(SessionStore::new(http_client.clone()));

        Ok(Self {
            settings,
            layout,
            http_client,
            session,
        })
    }
}
