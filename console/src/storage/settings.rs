//! Settings file management

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ConsoleError;
use crate::filesys::file::File;
use crate::http::client::ClientOptions;
use crate::logs::LogLevel;

/// API root override, shared with the web dashboard's build configuration
pub const ENV_API_BASE_URL: &str = "VITE_API_BASE_URL";
pub const ENV_AUTH_BASE_URL: &str = "LANG_AUTH_BASE_URL";
pub const ENV_SESSION_TOKEN: &str = "LANG_SESSION_TOKEN";
pub const ENV_LOG_LEVEL: &str = "LANG_LOG_LEVEL";

/// Console settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,

    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL for the REST API
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Auth provider root; `<base_url>/auth` when unset
    #[serde(default)]
    pub auth_base_url: Option<String>,

    /// Domain project subdomains are served under
    #[serde(default = "default_base_domain")]
    pub base_domain: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:3000/api/v1".to_string()
}

fn default_base_domain() -> String {
    "localhost".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            auth_base_url: None,
            base_domain: default_base_domain(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendSettings {
    pub fn resolved_auth_base_url(&self) -> String {
        match &self.auth_base_url {
            Some(url) if !url.trim().is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!("{}/auth", self.base_url.trim_end_matches('/')),
        }
    }
}

/// Session cookie settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Session token issued by the auth provider; never written back
    #[serde(default, skip_serializing)]
    pub token: Option<SecretString>,

    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_cookie_name() -> String {
    "better-auth.session_token".to_string()
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            token: None,
            cookie_name: default_cookie_name(),
        }
    }
}

impl Settings {
    /// Read settings, falling back to defaults when the file does not exist
    pub async fn load(file: &File) -> Result<Self, ConsoleError> {
        if !file.exists().await {
            debug!("No settings file at {}, using defaults", file.path().display());
            return Ok(Self::default());
        }
        file.read_json().await.map_err(|e| {
            ConsoleError::ConfigError(format!(
                "invalid settings file {}: {}",
                file.path().display(),
                e
            ))
        })
    }

    pub async fn save(&self, file: &File) -> Result<(), ConsoleError> {
        file.write_json(self).await
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConsoleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = read(ENV_API_BASE_URL) {
            self.backend.base_url = url;
        }
        if let Some(url) = read(ENV_AUTH_BASE_URL) {
            self.backend.auth_base_url = Some(url);
        }
        if let Some(token) = read(ENV_SESSION_TOKEN) {
            self.session.token = Some(SecretString::from(token));
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            self.log_level = level.parse().map_err(ConsoleError::ConfigError)?;
        }
        Ok(())
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.backend.base_url.clone(),
            auth_base_url: self.backend.resolved_auth_base_url(),
            session_token: self.session.token.clone(),
            session_cookie: self.session.cookie_name.clone(),
            timeout: std::time::Duration::from_secs(self.backend.timeout_secs.max(1)),
        }
    }
}
