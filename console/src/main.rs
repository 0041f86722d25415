//! langctl - Lang Platform console
//!
//! Manage projects, deployments, environment variables and framework presets
//! of a Lang Platform backend, and follow deployments as they build.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{debug, info};

use lang_console::app::state::AppState;
use lang_console::errors::ConsoleError;
use lang_console::logs::{init_logging, LogLevel, LogOptions};
use lang_console::models::framework::FrameworkType;
use lang_console::models::user::Role;
use lang_console::storage::layout::StorageLayout;
use lang_console::storage::settings::Settings;
use lang_console::utils::version_info;

mod cmd;

#[derive(Parser)]
#[command(name = "langctl")]
#[command(version, about = "Console for the Lang deployment platform")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Override the REST API root
    #[arg(long, global = true, env = "VITE_API_BASE_URL")]
    pub api_url: Option<String>,

    /// Directory holding settings.json and logs
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage projects
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Start the first deployment of a project
    Deploy {
        project: String,
        /// Follow status and logs until the deployment settles
        #[arg(short, long)]
        follow: bool,
    },
    /// Start a fresh deployment of a project
    Redeploy {
        project: String,
        #[arg(short, long)]
        follow: bool,
    },
    /// Inspect and delete deployments
    Deployments {
        #[command(subcommand)]
        command: DeploymentCommands,
    },
    /// Manage a project's environment variables
    Env {
        #[command(subcommand)]
        command: EnvCommands,
    },
    /// Browse and administer framework presets
    Frameworks {
        #[command(subcommand)]
        command: FrameworkCommands,
    },
    /// Link and browse a GitHub account
    Github {
        #[command(subcommand)]
        command: GithubCommands,
    },
    /// Manage a project's push webhook
    Webhooks {
        #[command(subcommand)]
        command: WebhookCommands,
    },
    /// Administer users
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Interactive view of a project's deployments and logs
    Watch {
        project: String,
        /// Deployment page to open on
        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// Show the signed-in user
    Whoami,
    /// Show or initialize the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Print version information
    Version,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    List {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "6")]
        limit: u32,
    },
    Show {
        id: String,
        /// Deployment page
        #[arg(long, default_value = "1")]
        page: u32,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        git_url: String,
        /// Framework preset ID
        #[arg(long)]
        framework: String,
        #[arg(long)]
        build_command: Option<String>,
        #[arg(long)]
        install_command: Option<String>,
        #[arg(long)]
        output_folder: Option<String>,
        #[arg(long)]
        start_command: Option<String>,
        /// `.env` file with the initial environment variables
        #[arg(long)]
        env_file: Option<PathBuf>,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        git_url: Option<String>,
        #[arg(long)]
        custom_domain: Option<String>,
        #[arg(long)]
        build_command: Option<String>,
        #[arg(long)]
        install_command: Option<String>,
        #[arg(long)]
        output_folder: Option<String>,
        #[arg(long)]
        start_command: Option<String>,
    },
    Delete {
        id: String,
        /// Confirmation phrase; prompted for when absent
        #[arg(long)]
        confirm: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DeploymentCommands {
    Status {
        id: String,
    },
    Logs {
        id: String,
        #[arg(short, long)]
        follow: bool,
    },
    Delete {
        id: String,
        #[arg(long)]
        confirm: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum EnvCommands {
    List {
        project: String,
    },
    Set {
        project: String,
        key: String,
        value: String,
        /// Redeploy so the change takes effect
        #[arg(long)]
        redeploy: bool,
    },
    Unset {
        project: String,
        key: String,
        #[arg(long)]
        redeploy: bool,
    },
    Import {
        project: String,
        file: PathBuf,
        #[arg(long)]
        redeploy: bool,
    },
}

#[derive(Subcommand)]
pub enum FrameworkCommands {
    List {
        #[arg(long, value_enum)]
        r#type: Option<FrameworkType>,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, value_enum)]
        r#type: FrameworkType,
        /// Image files to upload
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long, value_enum)]
        r#type: FrameworkType,
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    Delete {
        id: String,
        #[arg(long)]
        confirm: Option<String>,
    },
    ToggleLock {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum GithubCommands {
    Status,
    Repos {
        #[arg(long)]
        include_private: bool,
    },
    OauthUrl {
        /// Page the provider returns to after linking
        #[arg(long)]
        callback_url: String,
    },
    Disconnect,
    CheckAvailability {
        account_id: String,
    },
}

#[derive(Subcommand)]
pub enum WebhookCommands {
    Create { project: String },
    Delete { project: String },
}

#[derive(Subcommand)]
pub enum UserCommands {
    List {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "10")]
        limit: u32,
    },
    SetRole {
        id: String,
        #[arg(value_enum)]
        role: Role,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    Show,
    Init,
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        cmd::print_version(&version_info(), cli.json);
        return;
    }

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "error:".red().bold(), e.user_message());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), ConsoleError> {
    let layout = cli
        .config_dir
        .clone()
        .map(StorageLayout::new)
        .unwrap_or_default();

    let mut settings = Settings::load(&layout.settings_file()).await?;
    settings.apply_env(|key| std::env::var(key).ok())?;
    if let Some(url) = &cli.api_url {
        settings.backend.base_url = url.clone();
    }

    // the watch view owns the terminal, so its logs go to files
    let watching = matches!(cli.command, Commands::Watch { .. });
    if watching {
        layout.setup().await?;
    }
    let log_options = LogOptions {
        log_level: LogLevel::from_verbosity(cli.verbose).unwrap_or(settings.log_level),
        stderr: !watching,
        log_dir: watching.then(|| layout.logs_dir().path().to_path_buf()),
        json_format: settings.json_logs,
    };
    let _guard = match init_logging(log_options) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            None
        }
    };

    let version = version_info();
    debug!("langctl {} ({})", version.version, version.git_hash);

    let state = AppState::init(settings, layout)?;
    let result = cmd::dispatch(&cli, &state).await;
    if result.is_ok() {
        info!("Done");
    }
    result
}

/// Resolves on SIGINT or SIGTERM
pub async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let (Ok(mut sigterm), Ok(mut sigint)) = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) else {
            let _ = tokio::signal::ctrl_c().await;
            info!("Ctrl+C received, shutting down...");
            return;
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down...");
            }
            _ = sigint.recv() => {
                info!("SIGINT received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Ctrl+C received, shutting down...");
    }
}
