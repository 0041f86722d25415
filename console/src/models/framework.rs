//! Framework preset models

use serde::{Deserialize, Serialize};

/// What a preset builds, which decides the required project commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkType {
    Frontend,
    Backend,
    Fullstack,
}

impl FrameworkType {
    /// Frontend and fullstack projects produce a build output
    pub fn builds_static_output(&self) -> bool {
        matches!(self, FrameworkType::Frontend | FrameworkType::Fullstack)
    }

    /// Backend and fullstack projects run a server process
    pub fn runs_server(&self) -> bool {
        matches!(self, FrameworkType::Backend | FrameworkType::Fullstack)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameworkType::Frontend => "frontend",
            FrameworkType::Backend => "backend",
            FrameworkType::Fullstack => "fullstack",
        }
    }
}

impl std::fmt::Display for FrameworkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetImages {
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Admin-curated template selectable when creating a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkPreset {
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub framework_type: FrameworkType,

    #[serde(default)]
    pub images: PresetImages,

    /// Locked presets cannot be used for new projects
    #[serde(default)]
    pub locked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preset_decodes_type_and_defaults() {
        let preset: FrameworkPreset = serde_json::from_value(json!({
            "id": "f1",
            "name": "Next.js",
            "type": "fullstack"
        }))
        .unwrap();

        assert_eq!(preset.framework_type, FrameworkType::Fullstack);
        assert!(!preset.locked);
        assert!(preset.images.urls.is_empty());
        assert!(preset.framework_type.builds_static_output());
        assert!(preset.framework_type.runs_server());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = serde_json::from_value::<FrameworkPreset>(json!({
            "id": "f1",
            "name": "Elm",
            "type": "mobile"
        }));
        assert!(result.is_err());
    }
}
