use colored::Colorize;
use serde_json::json;

use lang_console::app::state::AppState;
use lang_console::controller::api::DeploymentApi;
use lang_console::errors::ConsoleError;
use lang_console::http::projects::DEPLOYMENTS_PAGE_SIZE;
use lang_console::models::deployment::DeploymentStatus;
use lang_console::ui::badge::status_badge;
use lang_console::workers::deployment_follower::{self, FollowEvent};
use openapi_client::models::PageQuery;

use super::print_json;

/// `deploy` and `redeploy`
pub async fn cmd_deploy(
    state: &AppState,
    project_id: &str,
    redeploy: bool,
    follow: bool,
    json: bool,
) -> Result<(), ConsoleError> {
    let client = state.http_client.as_ref();

    let response = if redeploy {
        let project = client
            .get_project(project_id, PageQuery::new(1, DEPLOYMENTS_PAGE_SIZE))
            .await?;
        if let Some(latest) = project.deployments.first() {
            let status = client.fetch_status(&latest.id).await?.status;
            if !status.can_redeploy() {
                return Err(ConsoleError::ValidationError(format!(
                    "A deployment is already in progress ({})",
                    latest.id
                )));
            }
        }
        client.redeploy(project_id).await?
    } else {
        client.deploy(project_id).await?
    };
    let deployment_id = response.deployment_id;

    if !follow {
        if json {
            return print_json(&json!({ "deploymentId": deployment_id }));
        }
        println!(
            "{} deployment {} {}",
            "Started".green(),
            deployment_id.bold(),
            status_badge(DeploymentStatus::Queued)
        );
        return Ok(());
    }

    if !json {
        println!("{} deployment {}", "Started".green(), deployment_id.bold());
    }
    follow_deployment(state, &deployment_id, json).await
}

/// Print status changes and new log lines until the deployment settles
pub(crate) async fn follow_deployment(
    state: &AppState,
    deployment_id: &str,
    json: bool,
) -> Result<(), ConsoleError> {
    let status = deployment_follower::run(
        state.http_client.as_ref(),
        deployment_id,
        &deployment_follower::Options::default(),
        tokio::time::sleep,
        |event| print_event(event, json),
        Box::pin(crate::await_shutdown_signal()),
    )
    .await?;

    match status {
        Some(DeploymentStatus::Failed) => {
            Err(ConsoleError::DeploymentFailed(deployment_id.to_string()))
        }
        _ => Ok(()),
    }
}

fn print_event(event: FollowEvent<'_>, json: bool) {
    match (event, json) {
        (FollowEvent::Status(status), true) => {
            println!("{}", json!({ "status": status }));
        }
        (FollowEvent::Status(status), false) => {
            println!("{}", status_badge(status));
        }
        (FollowEvent::Lines(entries), true) => {
            for entry in entries {
                println!("{}", json!({ "log": entry.log, "timestamp": entry.timestamp }));
            }
        }
        (FollowEvent::Lines(entries), false) => {
            for entry in entries {
                println!("{}", entry.render());
            }
        }
    }
}
