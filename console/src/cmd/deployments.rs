use colored::Colorize;
use serde_json::json;

use lang_console::app::state::AppState;
use lang_console::errors::ConsoleError;
use lang_console::ui::badge::status_badge;

use super::deploy::follow_deployment;
use super::{confirm_delete, print_json};
use crate::DeploymentCommands;

pub async fn cmd_deployments(
    state: &AppState,
    command: &DeploymentCommands,
    json: bool,
) -> Result<(), ConsoleError> {
    let client = &state.http_client;
    match command {
        DeploymentCommands::Status { id } => {
            let payload = client.get_deployment_status(id).await?;
            if json {
                return print_json(&payload);
            }
            println!("{} {}", id.bold(), status_badge(payload.status));
        }
        DeploymentCommands::Logs { id, follow: true } => {
            return follow_deployment(state, id, json).await;
        }
        DeploymentCommands::Logs { id, follow: false } => {
            let entries = client.get_deployment_logs(id).await?;
            if json {
                return print_json(&entries);
            }
            if entries.is_empty() {
                println!("No logs yet");
            }
            for entry in entries {
                println!("{}", entry.render());
            }
        }
        DeploymentCommands::Delete { id, confirm } => {
            confirm_delete(confirm.as_deref(), &format!("deployment {}", id))?;
            client.delete_deployment(id).await?;
            if json {
                return print_json(&json!({ "deleted": id }));
            }
            println!("{} deployment {}", "Deleted".red(), id);
        }
    }
    Ok(())
}
