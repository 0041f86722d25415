//! Deployment status polling worker

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{debug, info};

use crate::controller::api::DeploymentApi;
use crate::controller::project::ProjectController;

/// Status poller options
#[derive(Debug, Clone)]
pub struct Options {
    /// Polling interval
    pub interval: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(3000),
        }
    }
}

/// Run the status poller until shutdown or teardown of the view
pub async fn run<A, S, F>(
    options: &Options,
    controller: &ProjectController<A>,
    sleep_fn: S,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) where
    A: DeploymentApi + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    info!("Status poller starting...");

    loop {
        if !controller.is_alive() {
            info!("Status poller stopping, view closed");
            return;
        }

        let outcome = controller.poll_statuses().await;
        if outcome.polled > 0 {
            debug!(
                "Polled {} deployments ({} changed, {} failed)",
                outcome.polled, outcome.changed, outcome.failed
            );
        }

        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Status poller shutting down...");
                return;
            }
            _ = sleep_fn(options.interval) => {}
        }
    }
}
