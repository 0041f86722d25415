use colored::Colorize;

use lang_console::app::state::AppState;
use lang_console::env::editor::EnvEditor;
use lang_console::errors::ConsoleError;
use openapi_client::models::{PageQuery, UpdateProjectRequest};
use tracing::info;

use super::deploy::cmd_deploy;
use super::print_json;
use super::projects::read_env_file;
use crate::EnvCommands;

pub async fn cmd_env(state: &AppState, command: &EnvCommands, json: bool) -> Result<(), ConsoleError> {
    let (project_id, redeploy) = match command {
        EnvCommands::List { project } => return list(state, project, json).await,
        EnvCommands::Set {
            project, redeploy, ..
        }
        | EnvCommands::Unset {
            project, redeploy, ..
        }
        | EnvCommands::Import {
            project, redeploy, ..
        } => (project.as_str(), *redeploy),
    };

    let mut editor = load_editor(state, project_id).await?;
    match command {
        EnvCommands::Set { key, value, .. } => editor.set(key, value)?,
        EnvCommands::Unset { key, .. } => {
            if !editor.remove(key) {
                return Err(ConsoleError::NotFound(format!(
                    "Environment variable {}",
                    key
                )));
            }
        }
        EnvCommands::Import { file, .. } => {
            let applied = editor.import(read_env_file(file).await?);
            info!("Imported {} variables from {}", applied, file.display());
        }
        EnvCommands::List { .. } => {}
    }

    if !editor.is_dirty() {
        if !json {
            println!("No changes");
        }
        return Ok(());
    }

    let count = editor.entries().len();
    let request = UpdateProjectRequest {
        env_variables: Some(editor.into_entries()),
        ..Default::default()
    };
    state.http_client.update_project(project_id, &request).await?;
    if !json {
        println!(
            "{} {} environment variables of {}",
            "Saved".green(),
            count,
            project_id
        );
    }

    if redeploy {
        cmd_deploy(state, project_id, true, false, json).await?;
    } else if !json {
        println!("{}", "Redeploy the project for the change to take effect".dimmed());
    }
    Ok(())
}

async fn load_editor(state: &AppState, project_id: &str) -> Result<EnvEditor, ConsoleError> {
    let project = state
        .http_client
        .get_project(project_id, PageQuery::new(1, 1))
        .await?;
    Ok(EnvEditor::new(project.env_variables))
}

async fn list(state: &AppState, project_id: &str, json: bool) -> Result<(), ConsoleError> {
    let editor = load_editor(state, project_id).await?;
    if json {
        return print_json(editor.entries());
    }
    if editor.entries().is_empty() {
        println!("No environment variables");
    }
    for var in editor.entries() {
        println!("{}={}", var.key.bold(), var.value);
    }
    Ok(())
}
