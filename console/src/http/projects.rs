//! Project API client

use openapi_client::models::{
    CreateProjectRequest, DeployResponse, PageQuery, Pagination, UpdateProjectRequest,
};

use crate::errors::ConsoleError;
use crate::http::client::HttpClient;
use crate::models::project::{Project, ProjectSummary};

/// Default page size of the project listing
pub const PROJECTS_PAGE_SIZE: u32 = 6;

/// Default page size of a project's deployment history
pub const DEPLOYMENTS_PAGE_SIZE: u32 = 10;

impl HttpClient {
    /// List the signed-in user's projects
    pub async fn list_projects(
        &self,
        query: PageQuery,
    ) -> Result<(Vec<ProjectSummary>, Option<Pagination>), ConsoleError> {
        self.get_page("/projects", &query).await
    }

    /// Get a project with one page of its deployments
    pub async fn get_project(
        &self,
        project_id: &str,
        query: PageQuery,
    ) -> Result<Project, ConsoleError> {
        let path = format!("/projects/{}", project_id);
        self.get_with_query(&path, &query).await
    }

    /// Create a project
    pub async fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<serde_json::Value, ConsoleError> {
        self.post("/projects/create", request).await
    }

    /// Update a project
    pub async fn update_project(
        &self,
        project_id: &str,
        request: &UpdateProjectRequest,
    ) -> Result<(), ConsoleError> {
        let path = format!("/projects/{}", project_id);
        self.put(&path, request).await
    }

    /// Delete a project
    pub async fn delete_project(&self, project_id: &str) -> Result<(), ConsoleError> {
        let path = format!("/projects/{}", project_id);
        self.delete(&path).await
    }

    /// Start a deployment of a project
    pub async fn deploy_project(&self, project_id: &str) -> Result<DeployResponse, ConsoleError> {
        let path = format!("/projects/{}/deploy", project_id);
        self.post_empty(&path).await
    }

    /// Start a fresh deployment of an already deployed project
    pub async fn redeploy_project(&self, project_id: &str) -> Result<DeployResponse, ConsoleError> {
        let path = format!("/projects/{}/redeploy", project_id);
        self.post_empty(&path).await
    }
}
