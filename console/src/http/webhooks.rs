//! Webhook API client

use openapi_client::models::WebhookInfo;

use crate::errors::ConsoleError;
use crate::http::client::HttpClient;

impl HttpClient {
    /// Register the push webhook of a project
    pub async fn create_webhook(&self, project_id: &str) -> Result<WebhookInfo, ConsoleError> {
        let path = format!("/webhooks/projects/{}/create", project_id);
        Ok(self.post_ack(&path).await?.unwrap_or_default())
    }

    /// Remove the push webhook of a project
    pub async fn delete_webhook(&self, project_id: &str) -> Result<(), ConsoleError> {
        let path = format!("/webhooks/projects/{}", project_id);
        self.delete(&path).await
    }
}
