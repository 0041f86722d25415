//! Framework preset API client

use std::path::PathBuf;

use openapi_client::models::LockState;
use reqwest::{multipart, Method};
use serde::Serialize;

use crate::errors::ConsoleError;
use crate::http::client::HttpClient;
use crate::models::framework::{FrameworkPreset, FrameworkType};

/// Fields of a preset create/update form
#[derive(Debug, Clone)]
pub struct PresetForm {
    pub name: String,
    pub framework_type: FrameworkType,
    /// Image files uploaded under the `images` field
    pub images: Vec<PathBuf>,
}

impl PresetForm {
    /// Name and type are both required before anything is uploaded
    pub fn validate(&self) -> Result<(), ConsoleError> {
        if self.name.trim().is_empty() {
            return Err(ConsoleError::ValidationError(
                "Preset name is required".to_string(),
            ));
        }
        Ok(())
    }

    async fn into_form(self) -> Result<multipart::Form, ConsoleError> {
        let mut form = multipart::Form::new()
            .text("name", self.name.trim().to_string())
            .text("type", self.framework_type.as_str());

        for path in self.images {
            let bytes = tokio::fs::read(&path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            let part = multipart::Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(image_mime(&path))?;
            form = form.part("images", part);
        }

        Ok(form)
    }
}

fn image_mime(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[derive(Serialize)]
struct TypeFilter {
    #[serde(rename = "type")]
    framework_type: FrameworkType,
}

impl HttpClient {
    /// List presets, optionally of one type
    pub async fn list_presets(
        &self,
        framework_type: Option<FrameworkType>,
    ) -> Result<Vec<FrameworkPreset>, ConsoleError> {
        match framework_type {
            Some(framework_type) => {
                self.get_with_query("/framework", &TypeFilter { framework_type })
                    .await
            }
            None => self.get("/framework").await,
        }
    }

    /// Get a preset by ID
    pub async fn get_preset(&self, preset_id: &str) -> Result<FrameworkPreset, ConsoleError> {
        let path = format!("/framework/{}", preset_id);
        self.get(&path).await
    }

    /// Create a preset (admin only)
    pub async fn create_preset(
        &self,
        form: PresetForm,
    ) -> Result<Option<FrameworkPreset>, ConsoleError> {
        form.validate()?;
        let form = form.into_form().await?;
        self.send_multipart(Method::POST, "/framework/create", form)
            .await
    }

    /// Update a preset (admin only)
    pub async fn update_preset(
        &self,
        preset_id: &str,
        form: PresetForm,
    ) -> Result<Option<FrameworkPreset>, ConsoleError> {
        form.validate()?;
        let path = format!("/framework/{}", preset_id);
        let form = form.into_form().await?;
        self.send_multipart(Method::PUT, &path, form).await
    }

    /// Delete a preset (admin only)
    pub async fn delete_preset(&self, preset_id: &str) -> Result<(), ConsoleError> {
        let path = format!("/framework/{}", preset_id);
        self.delete(&path).await
    }

    /// Flip a preset's lock (admin only)
    pub async fn toggle_preset_lock(&self, preset_id: &str) -> Result<LockState, ConsoleError> {
        let path = format!("/framework/{}/toggle-lock", preset_id);
        self.patch::<LockState, ()>(&path, None)
            .await?
            .ok_or_else(|| ConsoleError::DecodeError(format!("response from {} carried no data", path)))
    }
}
