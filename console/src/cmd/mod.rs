//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module          | Commands handled                                   |
//! |-----------------|-----------------------------------------------------|
//! | `projects`      | `Projects`                                         |
//! | `deploy`        | `Deploy`, `Redeploy`                               |
//! | `deployments`   | `Deployments`                                      |
//! | `env`           | `Env`                                              |
//! | `frameworks`    | `Frameworks`                                       |
//! | `github`        | `Github`                                           |
//! | `webhooks`      | `Webhooks`                                         |
//! | `users`         | `Users`                                            |
//! | `watch`         | `Watch`                                            |
//! | `config`        | `Whoami`, `Config`, `Version`                      |

pub mod config;
pub mod deploy;
pub mod deployments;
pub mod env;
pub mod frameworks;
pub mod github;
pub mod projects;
pub mod users;
pub mod watch;
pub mod webhooks;

pub use config::{cmd_config, cmd_whoami, print_version};
pub use deploy::cmd_deploy;
pub use deployments::cmd_deployments;
pub use env::cmd_env;
pub use frameworks::cmd_frameworks;
pub use github::cmd_github;
pub use projects::cmd_projects;
pub use users::cmd_users;
pub use watch::cmd_watch;
pub use webhooks::cmd_webhooks;

use serde::Serialize;

use lang_console::app::state::AppState;
use lang_console::errors::ConsoleError;
use lang_console::ui::confirm::{prompt_phrase, require_phrase, PERMANENT_DELETE};
use lang_console::utils::version_info;

use crate::{Cli, Commands};

/// Route a parsed command line to its handler
pub async fn dispatch(cli: &Cli, state: &AppState) -> Result<(), ConsoleError> {
    let json = cli.json;
    match &cli.command {
        Commands::Projects { command } => cmd_projects(state, command, json).await,
        Commands::Deploy { project, follow } => cmd_deploy(state, project, false, *follow, json).await,
        Commands::Redeploy { project, follow } => {
            cmd_deploy(state, project, true, *follow, json).await
        }
        Commands::Deployments { command } => cmd_deployments(state, command, json).await,
        Commands::Env { command } => cmd_env(state, command, json).await,
        Commands::Frameworks { command } => cmd_frameworks(state, command, json).await,
        Commands::Github { command } => cmd_github(state, command, json).await,
        Commands::Webhooks { command } => cmd_webhooks(state, command, json).await,
        Commands::Users { command } => cmd_users(state, command, json).await,
        Commands::Watch { project, page } => cmd_watch(state, project, *page).await,
        Commands::Whoami => cmd_whoami(state, json).await,
        Commands::Config { command } => cmd_config(state, command, json).await,
        Commands::Version => {
            print_version(&version_info(), json);
            Ok(())
        }
    }
}

/// Pretty-print a value as JSON on stdout
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), ConsoleError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Require the delete phrase, from `--confirm` or typed at the prompt
pub(crate) fn confirm_delete(given: Option<&str>, what: &str) -> Result<(), ConsoleError> {
    match given {
        Some(typed) => require_phrase(typed, PERMANENT_DELETE),
        None => {
            let stdin = std::io::stdin();
            prompt_phrase(
                &mut stdin.lock(),
                &mut std::io::stderr(),
                &format!("This permanently deletes {}", what),
                PERMANENT_DELETE,
            )
        }
    }
}
