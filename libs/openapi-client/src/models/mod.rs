//! API models

use serde::{Deserialize, Serialize};

/// Response envelope shared by every REST endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,

    pub data: Option<T>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> ApiEnvelope<T> {
    /// The server-provided failure text, preferring `error` over `message`
    pub fn failure_text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Body of a non-2xx response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Server-side pagination block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    pub total_pages: u32,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_prev_page: bool,
}

/// Query parameters for paginated listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }
}

/// One environment variable as sent and received by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVariable {
    pub key: String,
    pub value: String,
}

impl EnvVariable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Project creation request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub git_url: String,
    pub framework_preset: String,
    pub build_command: Option<String>,
    pub install_command: Option<String>,
    pub output_folder: Option<String>,
    pub start_command: Option<String>,
    pub env_variables: Vec<EnvVariable>,
}

/// Partial project update; absent fields are left untouched server-side
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_variables: Option<Vec<EnvVariable>>,
}

impl UpdateProjectRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.git_url.is_none()
            && self.custom_domain.is_none()
            && self.build_command.is_none()
            && self.install_command.is_none()
            && self.output_folder.is_none()
            && self.start_command.is_none()
            && self.env_variables.is_none()
    }
}

/// Deploy / redeploy response payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployResponse {
    pub deployment_id: String,
}

/// User role update request
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// `GET /github/connected` answers outside the `data` block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConnectionResponse {
    pub success: bool,
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub username: Option<String>,
}

/// OAuth URL used to link a GitHub account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthUrl {
    pub url: String,
}

/// GitHub account availability for linking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountAvailability {
    pub available: bool,
}

/// Webhook registration result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookInfo {
    #[serde(default)]
    pub webhook_id: Option<serde_json::Value>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Framework lock toggle result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockState {
    pub locked: bool,
}
