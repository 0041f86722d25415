use std::path::Path;

use colored::Colorize;
use serde_json::json;

use lang_console::app::state::AppState;
use lang_console::env::parser::parse_env_file;
use lang_console::errors::ConsoleError;
use lang_console::http::projects::DEPLOYMENTS_PAGE_SIZE;
use lang_console::models::project::{Project, ProjectDraft, ProjectSummary};
use lang_console::ui::badge::{framework_badge, status_badge};
use openapi_client::models::{EnvVariable, PageQuery, Pagination, UpdateProjectRequest};

use super::{confirm_delete, print_json};
use crate::ProjectCommands;

pub async fn cmd_projects(
    state: &AppState,
    command: &ProjectCommands,
    json: bool,
) -> Result<(), ConsoleError> {
    let client = &state.http_client;
    match command {
        ProjectCommands::List { page, limit } => {
            let (projects, pagination) = client.list_projects(PageQuery::new(*page, *limit)).await?;
            if json {
                return print_json(&json!({ "projects": projects, "pagination": pagination }));
            }
            print_summaries(&projects, &state.settings.backend.base_domain);
            print_pagination(pagination.as_ref());
        }
        ProjectCommands::Show { id, page } => {
            let project = client
                .get_project(id, PageQuery::new(*page, DEPLOYMENTS_PAGE_SIZE))
                .await?;
            if json {
                return print_json(&project);
            }
            print_project(&project, &state.settings.backend.base_domain);
        }
        ProjectCommands::Create {
            name,
            git_url,
            framework,
            build_command,
            install_command,
            output_folder,
            start_command,
            env_file,
        } => {
            let env_variables = match env_file {
                Some(path) => read_env_file(path).await?,
                None => Vec::new(),
            };
            let preset = client.get_preset(framework).await?;
            let request = ProjectDraft {
                name: name.clone(),
                git_url: git_url.clone(),
                build_command: build_command.clone(),
                install_command: install_command.clone(),
                output_folder: output_folder.clone(),
                start_command: start_command.clone(),
                env_variables,
            }
            .into_request(&preset)?;

            let created = client.create_project(&request).await?;
            if json {
                return print_json(&created);
            }
            let id = created.get("id").and_then(|v| v.as_str()).unwrap_or("?");
            println!("{} project {} ({})", "Created".green(), request.name.bold(), id);
        }
        ProjectCommands::Update {
            id,
            name,
            git_url,
            custom_domain,
            build_command,
            install_command,
            output_folder,
            start_command,
        } => {
            let request = UpdateProjectRequest {
                name: name.clone(),
                git_url: git_url.clone(),
                custom_domain: custom_domain.clone(),
                build_command: build_command.clone(),
                install_command: install_command.clone(),
                output_folder: output_folder.clone(),
                start_command: start_command.clone(),
                env_variables: None,
            };
            if request.is_empty() {
                return Err(ConsoleError::ValidationError(
                    "Nothing to update".to_string(),
                ));
            }
            client.update_project(id, &request).await?;
            if json {
                return print_json(&json!({ "updated": id }));
            }
            println!("{} project {}", "Updated".green(), id);
        }
        ProjectCommands::Delete { id, confirm } => {
            confirm_delete(confirm.as_deref(), &format!("project {} and its deployments", id))?;
            client.delete_project(id).await?;
            if json {
                return print_json(&json!({ "deleted": id }));
            }
            println!("{} project {}", "Deleted".red(), id);
        }
    }
    Ok(())
}

/// Read a `.env` file; keys are normalized and the last value of a key wins
pub(crate) async fn read_env_file(path: &Path) -> Result<Vec<EnvVariable>, ConsoleError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(parse_env_file(&content))
}

fn print_summaries(projects: &[ProjectSummary], base_domain: &str) {
    if projects.is_empty() {
        println!("No projects yet");
        return;
    }
    for project in projects {
        let framework = project
            .framework_preset
            .as_ref()
            .and_then(|f| f.framework_type)
            .map(|t| framework_badge(t).to_string())
            .unwrap_or_default();
        let status = project
            .deployment
            .as_ref()
            .map(|d| status_badge(d.status).to_string())
            .unwrap_or_else(|| "No deployments".dimmed().to_string());
        println!("{}  {}  {} {}", project.name.bold(), project.id.dimmed(), framework, status);

        if let Some(sub_domain) = project.sub_domain.as_deref().filter(|s| !s.is_empty()) {
            println!("    https://{}.{}", sub_domain, base_domain);
        }
        println!("    {}", project.git_url.dimmed());
    }
}

pub(crate) fn print_pagination(pagination: Option<&Pagination>) {
    if let Some(p) = pagination {
        println!(
            "\nPage {} of {}{}",
            p.page,
            p.total_pages.max(1),
            p.total.map(|t| format!(" ({} total)", t)).unwrap_or_default()
        );
    }
}

fn print_project(project: &Project, base_domain: &str) {
    println!("{}  {}", project.name.bold(), project.id.dimmed());
    if let Some(url) = project.url(base_domain) {
        println!("{}", url.underline());
    }
    println!("Repository:      {}", project.git_url);
    if let Some(framework) = &project.framework_preset {
        println!(
            "Framework:       {} {}",
            framework.name.as_deref().unwrap_or("-"),
            framework
                .framework_type
                .map(|t| framework_badge(t).to_string())
                .unwrap_or_default()
        );
    }
    for (label, value) in [
        ("Install command", &project.install_command),
        ("Build command", &project.build_command),
        ("Output folder", &project.output_folder),
        ("Start command", &project.start_command),
    ] {
        if let Some(value) = value {
            println!("{:<16} {}", format!("{}:", label), value);
        }
    }
    println!("Env variables:   {}", project.env_variables.len());

    println!("\nDeployments");
    if project.deployments.is_empty() {
        println!("  No deployments yet");
    }
    for deployment in &project.deployments {
        println!(
            "  {} {} {} {}",
            deployment.id,
            status_badge(deployment.status),
            deployment.created_at.format("%Y-%m-%d %H:%M"),
            deployment.commit_message.as_deref().unwrap_or("")
        );
    }
    print_pagination(project.deployments_pagination.as_ref());
}
