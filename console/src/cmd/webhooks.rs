use colored::Colorize;
use serde_json::json;

use lang_console::app::state::AppState;
use lang_console::errors::ConsoleError;

use super::print_json;
use crate::WebhookCommands;

pub async fn cmd_webhooks(
    state: &AppState,
    command: &WebhookCommands,
    json: bool,
) -> Result<(), ConsoleError> {
    let client = &state.http_client;
    match command {
        WebhookCommands::Create { project } => {
            let webhook = client.create_webhook(project).await?;
            if json {
                return print_json(&webhook);
            }
            println!("{} push webhook for {}", "Registered".green(), project);
            if let Some(url) = webhook.url {
                println!("    {}", url.dimmed());
            }
        }
        WebhookCommands::Delete { project } => {
            client.delete_webhook(project).await?;
            if json {
                return print_json(&json!({ "deleted": project }));
            }
            println!("{} push webhook of {}", "Removed".red(), project);
        }
    }
    Ok(())
}
