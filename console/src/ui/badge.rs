//! Colored status badges

use colored::{ColoredString, Colorize};

use crate::models::deployment::DeploymentStatus;
use crate::models::framework::FrameworkType;
use crate::models::user::Role;

/// Deployment status badge; both terminal-success spellings share one color
pub fn status_badge(status: DeploymentStatus) -> ColoredString {
    let label = format!(" {} ", status.label());
    match status {
        DeploymentStatus::Queued => label.black().on_yellow(),
        DeploymentStatus::Deploying => label.white().on_blue(),
        DeploymentStatus::Ready => label.black().on_green(),
        DeploymentStatus::Failed => label.white().on_red(),
    }
}

pub fn framework_badge(framework_type: FrameworkType) -> ColoredString {
    let label = framework_type.as_str();
    match framework_type {
        FrameworkType::Frontend => label.cyan(),
        FrameworkType::Backend => label.magenta(),
        FrameworkType::Fullstack => label.blue(),
    }
}

pub fn role_badge(role: Role) -> ColoredString {
    match role {
        Role::Admin => role.as_str().red().bold(),
        Role::User => role.as_str().normal(),
    }
}

pub fn lock_badge(locked: bool) -> ColoredString {
    if locked {
        "locked".yellow()
    } else {
        "open".green()
    }
}
