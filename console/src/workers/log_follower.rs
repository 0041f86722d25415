//! Log following worker
//!
//! Fetches the selected deployment's transcript once whenever the selection or
//! its status changes, and every interval while that deployment is active.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::controller::api::DeploymentApi;
use crate::controller::logs::{LogUpdate, Viewport};
use crate::controller::project::ProjectController;
use crate::models::deployment::DeploymentStatus;

/// Run the log follower until shutdown or teardown of the view
pub async fn run<A, S, F>(
    controller: &ProjectController<A>,
    viewport: &dyn Viewport,
    sleep_fn: S,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) where
    A: DeploymentApi + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    info!("Log follower starting...");
    let options = controller.follow_options().clone();
    let mut last: Option<(String, DeploymentStatus)> = None;
    let mut tick_due = false;

    loop {
        if !controller.is_alive() {
            info!("Log follower stopping, view closed");
            return;
        }

        let target = controller.log_target();
        let forced = controller.take_log_refresh();

        let mut settled = true;
        if target.is_some() && (forced || tick_due || target != last) {
            match controller.fetch_logs(viewport).await {
                Ok(LogUpdate::Replaced {
                    len,
                    autoscroll: true,
                    ..
                }) => {
                    debug!("Log transcript grew to {} entries", len);
                    sleep_fn(options.settle_delay).await;
                    let selected = controller.log_target().map(|(id, _)| id);
                    if controller.is_alive() && selected == target.as_ref().map(|(id, _)| id.clone()) {
                        viewport.scroll_to_latest();
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Failed to fetch deployment logs: {}", e);
                    settled = false;
                }
            }
        }

        let wait = target
            .as_ref()
            .and_then(|(_, status)| options.interval_for(*status));
        // a failed one-shot fetch is retried on the next wake-up
        if settled {
            last = target;
        }

        let tick = async {
            match wait {
                Some(interval) => sleep_fn(interval).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Log follower shutting down...");
                return;
            }
            _ = controller.log_target_changed() => tick_due = false,
            _ = tick => tick_due = true,
        }
    }
}
