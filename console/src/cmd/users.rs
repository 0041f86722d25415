use colored::Colorize;
use serde_json::json;

use lang_console::app::state::AppState;
use lang_console::errors::ConsoleError;
use lang_console::ui::badge::role_badge;
use openapi_client::models::PageQuery;

use super::print_json;
use super::projects::print_pagination;
use crate::UserCommands;

pub async fn cmd_users(
    state: &AppState,
    command: &UserCommands,
    json: bool,
) -> Result<(), ConsoleError> {
    let admin = state.session.require_admin().await?;
    let client = &state.http_client;

    match command {
        UserCommands::List { page, limit } => {
            let (users, pagination) = client.list_users(PageQuery::new(*page, *limit)).await?;
            if json {
                return print_json(&json!({ "users": users, "pagination": pagination }));
            }
            for user in &users {
                println!(
                    "{}  {}  {}  {}",
                    user.display_name().bold(),
                    user.email,
                    role_badge(user.role),
                    user.id.dimmed()
                );
            }
            print_pagination(pagination.as_ref());
        }
        UserCommands::SetRole { id, role } => {
            if *id == admin.id {
                return Err(ConsoleError::ValidationError(
                    "You cannot change your own role".to_string(),
                ));
            }
            client.update_user_role(id, *role).await?;
            if json {
                return print_json(&json!({ "id": id, "role": role }));
            }
            println!("User {} is now {}", id, role_badge(*role));
        }
    }
    Ok(())
}
