use colored::Colorize;
use serde_json::json;

use lang_console::app::state::AppState;
use lang_console::authn::session::SessionState;
use lang_console::errors::ConsoleError;
use lang_console::ui::badge::role_badge;
use lang_console::utils::VersionInfo;

use super::print_json;
use crate::ConfigCommands;

pub async fn cmd_whoami(state: &AppState, json: bool) -> Result<(), ConsoleError> {
    let session = state.session.refresh().await?;
    if json {
        return print_json(&json!({ "user": session.user() }));
    }
    match session {
        SessionState::SignedIn(session) => {
            let user = &session.user;
            println!("{} <{}> {}", user.display_name().bold(), user.email, role_badge(user.role));
            Ok(())
        }
        _ => Err(ConsoleError::Unauthorized(
            "No active session; set LANG_SESSION_TOKEN".to_string(),
        )),
    }
}

pub async fn cmd_config(
    state: &AppState,
    command: &ConfigCommands,
    json: bool,
) -> Result<(), ConsoleError> {
    let file = state.layout.settings_file();
    match command {
        ConfigCommands::Show => {
            if json {
                return print_json(&state.settings);
            }
            let backend = &state.settings.backend;
            println!("Settings file:   {}", file.path().display());
            println!("API:             {}", backend.base_url);
            println!("Auth:            {}", backend.resolved_auth_base_url());
            println!("Base domain:     {}", backend.base_domain);
            println!("Timeout:         {}s", backend.timeout_secs);
            println!("Log level:       {}", state.settings.log_level.to_filter_string());
            println!(
                "Session token:   {}",
                if state.settings.session.token.is_some() {
                    "set".green()
                } else {
                    "not set".dimmed()
                }
            );
        }
        ConfigCommands::Init => {
            if file.exists().await {
                return Err(ConsoleError::ValidationError(format!(
                    "{} already exists",
                    file.path().display()
                )));
            }
            state.layout.setup().await?;
            state.settings.save(&file).await?;
            if json {
                return print_json(&json!({ "path": file.path() }));
            }
            println!("{} {}", "Wrote".green(), file.path().display());
        }
    }
    Ok(())
}

pub fn print_version(info: &VersionInfo, json: bool) {
    if json {
        if let Ok(text) = serde_json::to_string_pretty(info) {
            println!("{}", text);
        }
        return;
    }
    println!("langctl {}", info.version);
    println!("commit:  {}", info.git_hash);
    println!("built:   {}", info.build_time);
}
