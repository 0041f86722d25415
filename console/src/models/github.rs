//! GitHub repository models

use serde::{Deserialize, Serialize};

/// A repository visible through the linked GitHub account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubRepository {
    pub id: u64,

    pub name: String,

    pub full_name: String,

    #[serde(default)]
    pub clone_url: Option<String>,

    #[serde(default)]
    pub html_url: Option<String>,

    #[serde(default)]
    pub private: bool,

    #[serde(default)]
    pub default_branch: Option<String>,
}

impl GithubRepository {
    /// URL to register as a project's `gitUrl`
    pub fn git_url(&self) -> String {
        self.clone_url
            .clone()
            .or_else(|| self.html_url.clone())
            .unwrap_or_else(|| format!("https://github.com/{}", self.full_name))
    }
}
