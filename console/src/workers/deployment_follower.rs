//! Follows a single deployment until it settles
//!
//! Backs the `--follow` flags: each tick fetches the status, then the
//! transcript, and reports what changed since the previous tick.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::controller::api::DeploymentApi;
use crate::controller::lifecycle::Transition;
use crate::controller::logs::{LogBuffer, LogUpdate};
use crate::errors::ConsoleError;
use crate::models::deployment::{DeploymentStatus, LogEntry};

#[derive(Debug, Clone)]
pub struct Options {
    pub interval: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(3000),
        }
    }
}

/// What a tick observed
#[derive(Debug, PartialEq)]
pub enum FollowEvent<'a> {
    Status(DeploymentStatus),
    /// Entries appended since the last report
    Lines(&'a [LogEntry]),
}

fn is_fatal(error: &ConsoleError) -> bool {
    matches!(
        error,
        ConsoleError::NotFound(_) | ConsoleError::Unauthorized(_) | ConsoleError::Forbidden(_)
    )
}

/// Follow `deployment_id` until it reaches a terminal status or shutdown.
///
/// Returns the last status seen. Transient fetch errors are logged and retried
/// on the next tick; a missing deployment or a rejected session ends the run.
pub async fn run<A, S, F, E>(
    api: &A,
    deployment_id: &str,
    options: &Options,
    sleep_fn: S,
    mut on_event: E,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) -> Result<Option<DeploymentStatus>, ConsoleError>
where
    A: DeploymentApi + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
    E: FnMut(FollowEvent<'_>),
{
    info!("Following deployment {}...", deployment_id);
    let mut status: Option<DeploymentStatus> = None;
    let mut logs = LogBuffer::default();
    logs.reset(Some(deployment_id.to_string()));

    loop {
        match api.fetch_status(deployment_id).await {
            Ok(payload) => {
                let changed = match status {
                    None => true,
                    Some(previous) => {
                        let transition = Transition::observe(previous, payload.status);
                        if let Transition::Regressed { from, to } = transition {
                            debug!("Deployment {} reported {} after {}", deployment_id, to, from);
                        }
                        transition.is_change()
                    }
                };
                if changed {
                    status = Some(payload.status);
                    on_event(FollowEvent::Status(payload.status));
                }
            }
            Err(e) if is_fatal(&e) => return Err(e),
            Err(e) => warn!("Failed to fetch status of {}: {}", deployment_id, e),
        }

        match api.fetch_logs(deployment_id).await {
            Ok(entries) => {
                if let LogUpdate::Replaced { previous_len, len, .. } = logs.apply(entries, 0.0, 0.0) {
                    if len > previous_len {
                        on_event(FollowEvent::Lines(&logs.entries()[previous_len..]));
                    }
                }
            }
            Err(e) if is_fatal(&e) => return Err(e),
            Err(e) => warn!("Failed to fetch logs of {}: {}", deployment_id, e),
        }

        if status.map(|s| s.is_terminal()).unwrap_or(false) {
            info!("Deployment {} settled as {:?}", deployment_id, status);
            return Ok(status);
        }

        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Stopped following deployment {}", deployment_id);
                return Ok(status);
            }
            _ = sleep_fn(options.interval) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use openapi_client::models::{DeployResponse, PageQuery};

    use crate::models::deployment::StatusPayload;
    use crate::models::project::Project;

    #[derive(Default)]
    struct Script {
        statuses: Mutex<VecDeque<Result<DeploymentStatus, ConsoleError>>>,
        logs: Mutex<VecDeque<Vec<LogEntry>>>,
    }

    #[async_trait]
    impl DeploymentApi for Script {
        async fn fetch_project(&self, _: &str, _: PageQuery) -> Result<Project, ConsoleError> {
            Err(ConsoleError::Internal("unused".to_string()))
        }

        async fn fetch_status(&self, _: &str) -> Result<StatusPayload, ConsoleError> {
            self.statuses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(DeploymentStatus::Ready))
                .map(StatusPayload::new)
        }

        async fn fetch_logs(&self, _: &str) -> Result<Vec<LogEntry>, ConsoleError> {
            Ok(self.logs.lock().unwrap().pop_front().unwrap_or_default())
        }

        async fn deploy(&self, _: &str) -> Result<DeployResponse, ConsoleError> {
            Err(ConsoleError::Internal("unused".to_string()))
        }

        async fn redeploy(&self, _: &str) -> Result<DeployResponse, ConsoleError> {
            Err(ConsoleError::Internal("unused".to_string()))
        }

        async fn delete_deployment(&self, _: &str) -> Result<(), ConsoleError> {
            Ok(())
        }
    }

    fn lines(texts: &[&str]) -> Vec<LogEntry> {
        texts.iter().map(|t| LogEntry::new(*t)).collect()
    }

    #[tokio::test]
    async fn test_reports_new_lines_until_terminal() {
        let script = Script::default();
        script.statuses.lock().unwrap().extend([
            Ok(DeploymentStatus::Queued),
            Ok(DeploymentStatus::Deploying),
            Err(ConsoleError::ApiError {
                status: 502,
                message: "bad gateway".to_string(),
            }),
            Ok(DeploymentStatus::Ready),
        ]);
        script.logs.lock().unwrap().extend([
            lines(&[]),
            lines(&["install"]),
            lines(&["install"]),
            lines(&["install", "build", "done"]),
        ]);

        let mut seen = Vec::new();
        let result = run(
            &script,
            "d1",
            &Options::default(),
            |_| async {},
            |event| match event {
                FollowEvent::Status(s) => seen.push(s.to_string()),
                FollowEvent::Lines(entries) => {
                    seen.extend(entries.iter().map(|e| e.log.clone()))
                }
            },
            Box::pin(std::future::pending()),
        )
        .await
        .unwrap();

        assert_eq!(result, Some(DeploymentStatus::Ready));
        assert_eq!(
            seen,
            vec!["QUEUED", "DEPLOYING", "install", "READY", "build", "done"]
        );
    }

    #[tokio::test]
    async fn test_missing_deployment_ends_follow() {
        let script = Script::default();
        script
            .statuses
            .lock()
            .unwrap()
            .push_back(Err(ConsoleError::NotFound("Deployment".to_string())));

        let result = run(
            &script,
            "gone",
            &Options::default(),
            |_| async {},
            |_| {},
            Box::pin(std::future::pending()),
        )
        .await;
        assert!(matches!(result, Err(ConsoleError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_shutdown_returns_last_status() {
        let script = Script::default();
        script
            .statuses
            .lock()
            .unwrap()
            .push_back(Ok(DeploymentStatus::Deploying));

        let result = run(
            &script,
            "d1",
            &Options::default(),
            |_| std::future::pending::<()>(),
            |_| {},
            Box::pin(async {}),
        )
        .await
        .unwrap();
        assert_eq!(result, Some(DeploymentStatus::Deploying));
    }
}
