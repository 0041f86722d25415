//! Project detail controller
//!
//! Owns the [`ProjectView`] of one project and applies backend results to it.
//! Every write is guarded by a liveness flag: once the view is torn down,
//! responses that arrive late are dropped without touching state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::{watch, Notify};
use tracing::{debug, info, warn};

use crate::controller::api::DeploymentApi;
use crate::controller::logs::{FollowOptions, LogUpdate, Viewport};
use crate::controller::view::ProjectView;
use crate::errors::ConsoleError;
use crate::models::deployment::DeploymentStatus;
use crate::ui::confirm::{require_phrase, PERMANENT_DELETE};

/// Outcome of one status polling cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollOutcome {
    /// Status fetches issued
    pub polled: usize,

    /// Fetches that reported a different status than previously known
    pub changed: usize,

    /// Fetches that failed
    pub failed: usize,
}

pub struct ProjectController<A: DeploymentApi + ?Sized> {
    api: Arc<A>,
    view: RwLock<ProjectView>,
    follow: FollowOptions,
    alive: AtomicBool,
    log_refresh: AtomicBool,
    log_target: Notify,
    revision: watch::Sender<u64>,
}

impl<A: DeploymentApi + ?Sized> ProjectController<A> {
    pub fn new(api: Arc<A>, project_id: impl Into<String>, page_size: u32) -> Self {
        Self::with_follow_options(api, project_id, page_size, FollowOptions::default())
    }

    pub fn with_follow_options(
        api: Arc<A>,
        project_id: impl Into<String>,
        page_size: u32,
        follow: FollowOptions,
    ) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            api,
            view: RwLock::new(ProjectView::new(project_id, page_size)),
            follow,
            alive: AtomicBool::new(true),
            log_refresh: AtomicBool::new(false),
            log_target: Notify::new(),
            revision,
        }
    }

    pub fn follow_options(&self) -> &FollowOptions {
        &self.follow
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Read the current view
    pub fn with_view<R>(&self, f: impl FnOnce(&ProjectView) -> R) -> R {
        let view = self.view.read().unwrap_or_else(|e| e.into_inner());
        f(&view)
    }

    fn write_view<R>(&self, f: impl FnOnce(&mut ProjectView) -> R) -> R {
        let mut view = self.view.write().unwrap_or_else(|e| e.into_inner());
        f(&mut view)
    }

    fn project_id(&self) -> String {
        self.with_view(|v| v.project_id().to_string())
    }

    /// Receiver that observes a new revision after every visible change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self) {
        self.revision.send_modify(|r| *r = r.wrapping_add(1));
    }

    /// Wake the log follower: selection or selected status changed
    fn wake_logs(&self) {
        self.log_target.notify_one();
    }

    /// Resolves when the log target may have changed or the view was torn down
    pub async fn log_target_changed(&self) {
        self.log_target.notified().await;
    }

    /// Selected deployment and its effective status
    pub fn log_target(&self) -> Option<(String, DeploymentStatus)> {
        self.with_view(ProjectView::selected_target)
    }

    /// Ask the log follower for an immediate fetch regardless of status
    pub fn request_log_refresh(&self) {
        self.log_refresh.store(true, Ordering::SeqCst);
        self.wake_logs();
    }

    pub fn take_log_refresh(&self) -> bool {
        self.log_refresh.swap(false, Ordering::SeqCst)
    }

    /// Stop all writes into this view and wake waiting followers
    pub fn teardown(&self) {
        if self.alive.swap(false, Ordering::SeqCst) {
            debug!("Project view torn down");
            self.wake_logs();
            self.bump();
        }
    }

    /// Refetch the project for the current deployment page
    pub async fn refresh_project(&self) -> Result<(), ConsoleError> {
        let (project_id, query) = self.with_view(|v| (v.project_id().to_string(), v.page_query()));
        let project = self.api.fetch_project(&project_id, query).await?;

        if !self.is_alive() {
            return Ok(());
        }
        let selection_changed = self.write_view(|view| {
            // the page moved while the fetch was in flight
            if view.page_query() != query {
                return None;
            }
            Some(view.apply_project(project))
        });

        match selection_changed {
            None => debug!("Discarding project page {} after page change", query.page),
            Some(changed) => {
                if changed {
                    self.wake_logs();
                }
                self.bump();
            }
        }
        Ok(())
    }

    /// Fetch the status of every active deployment on the loaded page.
    ///
    /// Fetch failures are logged and leave the snapshot untouched. When any
    /// status changed the project is refetched afterwards.
    pub async fn poll_statuses(&self) -> PollOutcome {
        let mut outcome = PollOutcome::default();
        let ids = self.with_view(ProjectView::active_ids);
        if ids.is_empty() || !self.is_alive() {
            return outcome;
        }

        let api = &self.api;
        let mut fetches: FuturesUnordered<_> = ids
            .into_iter()
            .map(|id| async move {
                let result = api.fetch_status(&id).await;
                (id, result)
            })
            .collect();
        outcome.polled = fetches.len();

        while let Some((id, result)) = fetches.next().await {
            if !self.is_alive() {
                return outcome;
            }
            let payload = match result {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("Failed to fetch status of deployment {}: {}", id, e);
                    outcome.failed += 1;
                    continue;
                }
            };

            let (transition, is_selected) = self.write_view(|view| {
                let transition = view.record_status(&id, payload);
                (transition, view.selected_id() == Some(id.as_str()))
            });
            match transition {
                Some(t) if t.is_change() => {
                    debug!("Deployment {} moved: {:?}", id, t);
                    outcome.changed += 1;
                    if is_selected {
                        self.wake_logs();
                    }
                    self.bump();
                }
                Some(_) => {}
                None => debug!("Dropping status of untracked deployment {}", id),
            }
        }

        if outcome.changed > 0 {
            if let Err(e) = self.refresh_project().await {
                warn!("Failed to refetch project after status change: {}", e);
            }
        }
        outcome
    }

    /// Fetch the transcript of the selected deployment and apply it.
    ///
    /// The result is dropped when the view was torn down or the selection
    /// moved while the fetch was in flight.
    pub async fn fetch_logs(&self, viewport: &dyn Viewport) -> Result<LogUpdate, ConsoleError> {
        let Some((deployment_id, _)) = self.log_target() else {
            return Ok(LogUpdate::Unchanged);
        };
        let entries = self.api.fetch_logs(&deployment_id).await?;

        if !self.is_alive() {
            return Ok(LogUpdate::Unchanged);
        }
        let threshold = self.follow.near_bottom_threshold;
        let update = self.write_view(|view| {
            if view.selected_id() != Some(deployment_id.as_str()) {
                return LogUpdate::Unchanged;
            }
            view.logs_mut()
                .apply(entries, viewport.distance_from_bottom(), threshold)
        });

        if let LogUpdate::Replaced { .. } = update {
            self.bump();
        }
        Ok(update)
    }

    /// Select a deployment on the loaded page
    pub fn select(&self, deployment_id: &str) -> Result<(), ConsoleError> {
        if self.write_view(|view| view.select(deployment_id))? {
            self.wake_logs();
            self.bump();
        }
        Ok(())
    }

    /// Load another page of deployments
    pub async fn set_page(&self, page: u32) -> Result<(), ConsoleError> {
        if self.write_view(|view| view.set_page(page))? {
            self.refresh_project().await?;
        }
        Ok(())
    }

    pub async fn next_page(&self) -> Result<(), ConsoleError> {
        let (page, has_next) = self.with_view(|v| (v.page(), v.has_next_page()));
        if !has_next {
            return Err(ConsoleError::ValidationError("Already on the last page".to_string()));
        }
        self.set_page(page + 1).await
    }

    pub async fn prev_page(&self) -> Result<(), ConsoleError> {
        let page = self.with_view(ProjectView::page);
        if page <= 1 {
            return Err(ConsoleError::ValidationError("Already on the first page".to_string()));
        }
        self.set_page(page - 1).await
    }

    /// Request the first deployment of the project
    pub async fn deploy(&self) -> Result<String, ConsoleError> {
        let response = self.api.deploy(&self.project_id()).await?;
        self.track_new_deployment(&response.deployment_id).await;
        Ok(response.deployment_id)
    }

    /// Request a new deployment; the latest one must have settled
    pub async fn redeploy(&self) -> Result<String, ConsoleError> {
        if let Some(status) = self.with_view(|v| v.latest().map(|(_, s)| s)) {
            if !status.can_redeploy() {
                return Err(ConsoleError::ValidationError(
                    "A deployment is already in progress".to_string(),
                ));
            }
        }
        let response = self.api.redeploy(&self.project_id()).await?;
        self.track_new_deployment(&response.deployment_id).await;
        Ok(response.deployment_id)
    }

    async fn track_new_deployment(&self, deployment_id: &str) {
        if !self.is_alive() {
            return;
        }
        info!("Deployment {} queued", deployment_id);
        self.write_view(|view| view.seed_deployment(deployment_id));
        self.wake_logs();
        self.bump();

        if let Err(e) = self.refresh_project().await {
            warn!("Failed to refetch project after deploy: {}", e);
        }
    }

    /// Delete a deployment after the confirmation phrase was typed
    pub async fn delete_deployment(
        &self,
        deployment_id: &str,
        confirmation: &str,
    ) -> Result<(), ConsoleError> {
        require_phrase(confirmation, PERMANENT_DELETE)?;
        self.api.delete_deployment(deployment_id).await?;
        info!("Deployment {} deleted", deployment_id);
        self.refresh_project().await
    }
}
