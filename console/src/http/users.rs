//! User administration API client

use openapi_client::models::{PageQuery, Pagination, UpdateRoleRequest};

use crate::errors::ConsoleError;
use crate::http::client::HttpClient;
use crate::models::user::{Role, User};

impl HttpClient {
    /// List platform users (admin only)
    pub async fn list_users(
        &self,
        query: PageQuery,
    ) -> Result<(Vec<User>, Option<Pagination>), ConsoleError> {
        self.get_page("/users", &query).await
    }

    /// Change a user's role (admin only)
    pub async fn update_user_role(&self, user_id: &str, role: Role) -> Result<(), ConsoleError> {
        let path = format!("/users/{}/role", user_id);
        let body = UpdateRoleRequest {
            role: role.as_str().to_string(),
        };
        let _: Option<serde_json::Value> = self.patch(&path, Some(&body)).await?;
        Ok(())
    }
}
