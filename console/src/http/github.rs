//! GitHub linking API client

use openapi_client::models::{AccountAvailability, GithubConnectionResponse, OAuthUrl};
use serde::Serialize;

use crate::errors::ConsoleError;
use crate::http::client::HttpClient;
use crate::models::github::GithubRepository;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RepoQuery {
    include_private: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CallbackQuery<'a> {
    #[serde(rename = "callbackURL")]
    callback_url: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityQuery<'a> {
    github_account_id: &'a str,
}

impl HttpClient {
    /// Whether a GitHub account is linked
    pub async fn github_connection(&self) -> Result<GithubConnectionResponse, ConsoleError> {
        let url = format!("{}/github/connected", self.base_url());
        self.get_raw(&url).await
    }

    /// Repositories of the linked account
    pub async fn github_repositories(
        &self,
        include_private: bool,
    ) -> Result<Vec<GithubRepository>, ConsoleError> {
        let query = RepoQuery {
            include_private: include_private.to_string(),
        };
        let (repos, _) = self.get_page("/github/repos", &query).await?;
        Ok(repos)
    }

    /// OAuth URL that links a GitHub account and returns to `callback_url`
    pub async fn github_oauth_url(&self, callback_url: &str) -> Result<OAuthUrl, ConsoleError> {
        self.get_with_query("/github/oauth-url", &CallbackQuery { callback_url })
            .await
    }

    /// Unlink the GitHub account
    pub async fn github_disconnect(&self) -> Result<(), ConsoleError> {
        self.delete("/github/disconnect").await
    }

    /// Whether a GitHub account may be linked to this user
    pub async fn github_account_availability(
        &self,
        github_account_id: &str,
    ) -> Result<AccountAvailability, ConsoleError> {
        self.get_with_query(
            "/github/check-availability",
            &AvailabilityQuery { github_account_id },
        )
        .await
    }
}
