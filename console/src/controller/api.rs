//! Backend operations the deployment controller depends on

use async_trait::async_trait;

use openapi_client::models::{DeployResponse, PageQuery};

use crate::errors::ConsoleError;
use crate::http::client::HttpClient;
use crate::models::deployment::{LogEntry, StatusPayload};
use crate::models::project::Project;

#[async_trait]
pub trait DeploymentApi: Send + Sync {
    async fn fetch_project(&self, project_id: &str, page: PageQuery) -> Result<Project, ConsoleError>;

    async fn fetch_status(&self, deployment_id: &str) -> Result<StatusPayload, ConsoleError>;

    async fn fetch_logs(&self, deployment_id: &str) -> Result<Vec<LogEntry>, ConsoleError>;

    async fn deploy(&self, project_id: &str) -> Result<DeployResponse, ConsoleError>;

    async fn redeploy(&self, project_id: &str) -> Result<DeployResponse, ConsoleError>;

    async fn delete_deployment(&self, deployment_id: &str) -> Result<(), ConsoleError>;
}

#[async_trait]
impl DeploymentApi for HttpClient {
    async fn fetch_project(&self, project_id: &str, page: PageQuery) -> Result<Project, ConsoleError> {
        self.get_project(project_id, page).await
    }

    async fn fetch_status(&self, deployment_id: &str) -> Result<StatusPayload, ConsoleError> {
        self.get_deployment_status(deployment_id).await
    }

    async fn fetch_logs(&self, deployment_id: &str) -> Result<Vec<LogEntry>, ConsoleError> {
        self.get_deployment_logs(deployment_id).await
    }

    async fn deploy(&self, project_id: &str) -> Result<DeployResponse, ConsoleError> {
        self.deploy_project(project_id).await
    }

    async fn redeploy(&self, project_id: &str) -> Result<DeployResponse, ConsoleError> {
        self.redeploy_project(project_id).await
    }

    async fn delete_deployment(&self, deployment_id: &str) -> Result<(), ConsoleError> {
        HttpClient::delete_deployment(self, deployment_id).await
    }
}
