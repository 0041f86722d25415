//! Auth provider session lookup

use crate::errors::ConsoleError;
use crate::http::client::HttpClient;
use crate::models::user::Session;

impl HttpClient {
    /// Fetch the current session; `None` when the cookie is missing or expired
    pub async fn get_session(&self) -> Result<Option<Session>, ConsoleError> {
        let url = format!("{}/get-session", self.auth_base_url());
        match self.get_raw::<Option<Session>>(&url).await {
            Ok(session) => Ok(session),
            Err(ConsoleError::Unauthorized(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
