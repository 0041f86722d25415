//! Deployment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Deployment status as reported by the backend.
///
/// The backend reports terminal success as either `READY` or `DEPLOYED`;
/// both decode to [`DeploymentStatus::Ready`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentStatus {
    #[serde(rename = "QUEUED")]
    Queued,

    #[serde(rename = "DEPLOYING")]
    Deploying,

    #[serde(rename = "READY", alias = "DEPLOYED")]
    Ready,

    #[serde(rename = "FAILED")]
    Failed,
}

impl DeploymentStatus {
    /// No further automatic transition happens from a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeploymentStatus::Ready | DeploymentStatus::Failed)
    }

    /// Statuses that are polled
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// A new deployment may only be requested from a settled one
    pub fn can_redeploy(&self) -> bool {
        self.is_terminal()
    }

    /// Badge label shown next to a deployment
    pub fn label(&self) -> &'static str {
        match self {
            DeploymentStatus::Queued => "Queued",
            DeploymentStatus::Deploying => "Building...",
            DeploymentStatus::Ready => "Deployed",
            DeploymentStatus::Failed => "Failed",
        }
    }

    pub fn as_wire_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Queued => "QUEUED",
            DeploymentStatus::Deploying => "DEPLOYING",
            DeploymentStatus::Ready => "READY",
            DeploymentStatus::Failed => "FAILED",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            DeploymentStatus::Queued => 0,
            DeploymentStatus::Deploying => 1,
            DeploymentStatus::Ready | DeploymentStatus::Failed => 2,
        }
    }

    /// Whether `next` is a forward move along QUEUED -> DEPLOYING -> terminal
    pub fn can_transition_to(&self, next: DeploymentStatus) -> bool {
        if self == &next {
            return true;
        }
        !self.is_terminal() && next.rank() > self.rank()
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

/// One build/release attempt of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Opaque deployment ID
    pub id: String,

    /// Status embedded in the project payload (may be stale)
    pub status: DeploymentStatus,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub sub_domain: Option<String>,

    #[serde(default)]
    pub commit_hash: Option<String>,

    #[serde(default)]
    pub commit_message: Option<String>,
}

/// Payload of `GET /projects/deployments/:id/status`.
///
/// Auxiliary fields beyond `status` are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: DeploymentStatus,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StatusPayload {
    pub fn new(status: DeploymentStatus) -> Self {
        Self {
            status,
            extra: serde_json::Map::new(),
        }
    }
}

/// A single line of a deployment's build transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(deserialize_with = "log_text")]
    pub log: String,

    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl LogEntry {
    pub fn new(log: impl Into<String>) -> Self {
        Self {
            log: log.into(),
            timestamp: None,
        }
    }

    /// `[HH:MM:SS] text`, with an empty time slot for untimed lines
    pub fn render(&self) -> String {
        let time = self
            .timestamp
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_default();
        format!("[{}] {}", time, self.log)
    }
}

// Structured log payloads are rendered as their JSON text.
fn log_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}
