//! Deployment API client

use crate::errors::ConsoleError;
use crate::http::client::HttpClient;
use crate::models::deployment::{LogEntry, StatusPayload};

impl HttpClient {
    /// Get the current status of a deployment
    pub async fn get_deployment_status(
        &self,
        deployment_id: &str,
    ) -> Result<StatusPayload, ConsoleError> {
        let path = format!("/projects/deployments/{}/status", deployment_id);
        self.get(&path).await
    }

    /// Get the full log transcript of a deployment
    pub async fn get_deployment_logs(
        &self,
        deployment_id: &str,
    ) -> Result<Vec<LogEntry>, ConsoleError> {
        let path = format!("/projects/deployments/{}/logs", deployment_id);
        self.get(&path).await
    }

    /// Delete a deployment
    pub async fn delete_deployment(&self, deployment_id: &str) -> Result<(), ConsoleError> {
        let path = format!("/projects/deployments/{}", deployment_id);
        self.delete(&path).await
    }
}
