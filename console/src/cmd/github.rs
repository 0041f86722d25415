use colored::Colorize;
use serde_json::json;

use lang_console::app::state::AppState;
use lang_console::errors::ConsoleError;

use super::print_json;
use crate::GithubCommands;

pub async fn cmd_github(
    state: &AppState,
    command: &GithubCommands,
    json: bool,
) -> Result<(), ConsoleError> {
    let client = &state.http_client;
    match command {
        GithubCommands::Status => {
            let connection = client.github_connection().await?;
            if json {
                return print_json(&connection);
            }
            match (connection.connected, connection.username) {
                (true, Some(username)) => println!("Connected as {}", username.bold()),
                (true, None) => println!("Connected"),
                (false, _) => println!("{}", "Not connected".dimmed()),
            }
        }
        GithubCommands::Repos { include_private } => {
            let repos = client.github_repositories(*include_private).await?;
            if json {
                return print_json(&repos);
            }
            if repos.is_empty() {
                println!("No repositories");
            }
            for repo in &repos {
                let visibility = if repo.private {
                    "private".yellow()
                } else {
                    "public".normal()
                };
                println!("{}  {}  {}", repo.full_name.bold(), visibility, repo.git_url().dimmed());
            }
        }
        GithubCommands::OauthUrl { callback_url } => {
            let oauth = client.github_oauth_url(callback_url).await?;
            if json {
                return print_json(&oauth);
            }
            println!("Open this URL to link your GitHub account:\n{}", oauth.url.underline());
        }
        GithubCommands::Disconnect => {
            client.github_disconnect().await?;
            if json {
                return print_json(&json!({ "connected": false }));
            }
            println!("{} GitHub account", "Disconnected".red());
        }
        GithubCommands::CheckAvailability { account_id } => {
            let availability = client.github_account_availability(account_id).await?;
            if json {
                return print_json(&availability);
            }
            if availability.available {
                println!("GitHub account {} can be linked", account_id);
            } else {
                println!("GitHub account {} is linked to another user", account_id);
            }
        }
    }
    Ok(())
}
