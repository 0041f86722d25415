//! Project models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use openapi_client::models::{CreateProjectRequest, EnvVariable, Pagination};

use crate::errors::ConsoleError;
use crate::models::deployment::Deployment;
use crate::models::framework::{FrameworkPreset, FrameworkType};

/// Framework preset as embedded in a project payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub framework_type: Option<FrameworkType>,
}

/// Full project detail as returned by `GET /projects/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,

    pub name: String,

    pub git_url: String,

    #[serde(default)]
    pub sub_domain: Option<String>,

    #[serde(default)]
    pub custom_domain: Option<String>,

    #[serde(default)]
    pub framework_preset: Option<FrameworkRef>,

    #[serde(default)]
    pub build_command: Option<String>,

    #[serde(default)]
    pub install_command: Option<String>,

    #[serde(default)]
    pub output_folder: Option<String>,

    #[serde(default)]
    pub start_command: Option<String>,

    /// Ordered newest first
    #[serde(default)]
    pub deployments: Vec<Deployment>,

    #[serde(default)]
    pub deployments_pagination: Option<Pagination>,

    #[serde(default)]
    pub env_variables: Vec<EnvVariable>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn deployment(&self, id: &str) -> Option<&Deployment> {
        self.deployments.iter().find(|d| d.id == id)
    }

    /// Public URL of the project, custom domain first
    pub fn url(&self, base_domain: &str) -> Option<String> {
        if let Some(domain) = self.custom_domain.as_deref().filter(|d| !d.is_empty()) {
            return Some(format!("https://{}", domain));
        }
        self.sub_domain
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("https://{}.{}", s, base_domain))
    }
}

/// Entry of `GET /projects`, carrying only the latest deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,

    pub name: String,

    pub git_url: String,

    #[serde(default)]
    pub sub_domain: Option<String>,

    #[serde(default)]
    pub framework_preset: Option<FrameworkRef>,

    #[serde(default)]
    pub deployment: Option<Deployment>,
}

/// Default install command of a new project
pub const DEFAULT_INSTALL_COMMAND: &str = "npm install";

/// Default build output folder of a new project
pub const DEFAULT_OUTPUT_FOLDER: &str = "dist";

/// Unvalidated input of the create-project form
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub name: String,
    pub git_url: String,
    pub build_command: Option<String>,
    pub install_command: Option<String>,
    pub output_folder: Option<String>,
    pub start_command: Option<String>,
    pub env_variables: Vec<EnvVariable>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ProjectDraft {
    /// Validate against the chosen preset and build the request.
    ///
    /// Build command and output folder are only sent for presets that build
    /// static output, the start command only for presets that run a server.
    pub fn into_request(self, preset: &FrameworkPreset) -> Result<CreateProjectRequest, ConsoleError> {
        let name = self.name.trim();
        let git_url = self.git_url.trim();
        if name.is_empty() || git_url.is_empty() {
            return Err(ConsoleError::ValidationError(
                "Please fill in all required fields".to_string(),
            ));
        }
        if preset.locked {
            return Err(ConsoleError::ValidationError(format!(
                "Framework preset {} is locked",
                preset.name
            )));
        }

        let framework_type = preset.framework_type;
        let build_command = non_blank(&self.build_command);
        if framework_type.builds_static_output() && build_command.is_none() {
            return Err(ConsoleError::ValidationError(
                "Build command is required for frontend and fullstack projects".to_string(),
            ));
        }

        let install_command =
            non_blank(&self.install_command).unwrap_or_else(|| DEFAULT_INSTALL_COMMAND.to_string());
        let output_folder =
            non_blank(&self.output_folder).unwrap_or_else(|| DEFAULT_OUTPUT_FOLDER.to_string());

        Ok(CreateProjectRequest {
            name: name.to_string(),
            git_url: git_url.to_string(),
            framework_preset: preset.id.clone(),
            build_command: build_command.filter(|_| framework_type.builds_static_output()),
            install_command: Some(install_command),
            output_folder: framework_type
                .builds_static_output()
                .then_some(output_folder),
            start_command: non_blank(&self.start_command).filter(|_| framework_type.runs_server()),
            env_variables: self.env_variables,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::framework::PresetImages;

    fn preset(framework_type: FrameworkType, locked: bool) -> FrameworkPreset {
        FrameworkPreset {
            id: "f1".to_string(),
            name: "Vite".to_string(),
            framework_type,
            images: PresetImages::default(),
            locked,
        }
    }

    fn draft() -> ProjectDraft {
        ProjectDraft {
            name: " site ".to_string(),
            git_url: "https://github.com/acme/site.git".to_string(),
            build_command: Some("npm run build".to_string()),
            install_command: None,
            output_folder: Some("  ".to_string()),
            start_command: Some("node server.js".to_string()),
            env_variables: vec![],
        }
    }

    #[test]
    fn test_frontend_request_drops_start_command() {
        let request = draft().into_request(&preset(FrameworkType::Frontend, false)).unwrap();
        assert_eq!(request.name, "site");
        assert_eq!(request.install_command.as_deref(), Some("npm install"));
        assert_eq!(request.output_folder.as_deref(), Some("dist"));
        assert_eq!(request.start_command, None);
    }

    #[test]
    fn test_backend_request_drops_build_fields() {
        let mut d = draft();
        d.build_command = None;
        let request = d.into_request(&preset(FrameworkType::Backend, false)).unwrap();
        assert_eq!(request.build_command, None);
        assert_eq!(request.output_folder, None);
        assert_eq!(request.start_command.as_deref(), Some("node server.js"));
    }

    #[test]
    fn test_fullstack_requires_build_command() {
        let mut d = draft();
        d.build_command = Some(" ".to_string());
        assert!(matches!(
            d.into_request(&preset(FrameworkType::Fullstack, false)),
            Err(ConsoleError::ValidationError(_))
        ));
    }

    #[test]
    fn test_locked_preset_and_missing_fields_rejected() {
        assert!(draft().into_request(&preset(FrameworkType::Frontend, true)).is_err());
        let mut d = draft();
        d.git_url = String::new();
        assert!(d.into_request(&preset(FrameworkType::Frontend, false)).is_err());
    }

    #[test]
    fn test_project_url_prefers_custom_domain() {
        let project: Project = serde_json::from_str(
            r#"{"id":"p1","name":"site","gitUrl":"g","subDomain":"site-1","customDomain":""}"#,
        )
        .unwrap();
        assert_eq!(project.url("lang.dev").as_deref(), Some("https://site-1.lang.dev"));
    }
}
