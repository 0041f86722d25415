//! Project detail view-model

use chrono::{DateTime, Utc};
use tracing::warn;

use openapi_client::models::{PageQuery, Pagination};

use crate::controller::lifecycle::Transition;
use crate::controller::logs::LogBuffer;
use crate::controller::snapshot::StatusSnapshot;
use crate::errors::ConsoleError;
use crate::models::deployment::{Deployment, DeploymentStatus, StatusPayload};
use crate::models::project::Project;

/// One rendered line of the deployment list
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentRow {
    pub id: String,
    pub status: DeploymentStatus,
    pub label: &'static str,
    pub selected: bool,
    pub created_at: DateTime<Utc>,
    pub commit_message: Option<String>,
}

/// State of one open project detail view
#[derive(Debug, Clone)]
pub struct ProjectView {
    project_id: String,
    page: u32,
    page_size: u32,
    project: Option<Project>,
    selected: Option<String>,
    snapshot: StatusSnapshot,
    logs: LogBuffer,
}

impl ProjectView {
    pub fn new(project_id: impl Into<String>, page_size: u32) -> Self {
        Self {
            project_id: project_id.into(),
            page: 1,
            page_size: page_size.max(1),
            project: None,
            selected: None,
            snapshot: StatusSnapshot::new(),
            logs: LogBuffer::default(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(self.page, self.page_size)
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.project
            .as_ref()
            .and_then(|p| p.deployments_pagination.as_ref())
    }

    pub fn snapshot(&self) -> &StatusSnapshot {
        &self.snapshot
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    pub fn logs_mut(&mut self) -> &mut LogBuffer {
        &mut self.logs
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    fn deployments(&self) -> &[Deployment] {
        self.project
            .as_ref()
            .map(|p| p.deployments.as_slice())
            .unwrap_or_default()
    }

    /// Overlaid status of a deployment on the loaded page
    pub fn effective_status(&self, deployment_id: &str) -> Option<DeploymentStatus> {
        match self.deployments().iter().find(|d| d.id == deployment_id) {
            Some(d) => Some(self.snapshot.effective_status(d)),
            None => self.snapshot.get(deployment_id).map(|p| p.status),
        }
    }

    /// Selected deployment and its effective status
    pub fn selected_target(&self) -> Option<(String, DeploymentStatus)> {
        let id = self.selected.as_ref()?;
        let status = self.effective_status(id)?;
        Some((id.clone(), status))
    }

    /// Newest deployment on the loaded page
    pub fn latest(&self) -> Option<(&Deployment, DeploymentStatus)> {
        self.deployments()
            .first()
            .map(|d| (d, self.snapshot.effective_status(d)))
    }

    /// Deployments on the loaded page that still need status polling
    pub fn active_ids(&self) -> Vec<String> {
        self.snapshot.active_ids(self.deployments())
    }

    /// Merge a freshly fetched project into the view.
    ///
    /// The selection survives when its deployment is still listed, otherwise
    /// it moves to the newest deployment, or clears on an empty list. Returns
    /// whether the selection changed.
    pub fn apply_project(&mut self, project: Project) -> bool {
        self.snapshot.reconcile(&project.deployments);

        let previous = self.selected.clone();
        self.selected = match previous.as_deref() {
            Some(id) if project.deployment(id).is_some() => previous.clone(),
            _ => project.deployments.first().map(|d| d.id.clone()),
        };
        self.project = Some(project);

        self.logs.reset(self.selected.clone());
        self.selected != previous
    }

    /// Select a deployment on the loaded page
    pub fn select(&mut self, deployment_id: &str) -> Result<bool, ConsoleError> {
        if !self.deployments().iter().any(|d| d.id == deployment_id) {
            return Err(ConsoleError::NotFound(format!(
                "Deployment {} is not on this page",
                deployment_id
            )));
        }
        Ok(self.set_selection(Some(deployment_id.to_string())))
    }

    fn set_selection(&mut self, selected: Option<String>) -> bool {
        if self.selected == selected {
            return false;
        }
        self.selected = selected;
        self.logs.reset(self.selected.clone());
        true
    }

    /// Register a just-requested deployment: seeded as queued and selected
    /// ahead of the refetch that lists it
    pub fn seed_deployment(&mut self, deployment_id: &str) {
        self.snapshot.seed_queued(deployment_id);
        self.set_selection(Some(deployment_id.to_string()));
    }

    /// Store a polled status.
    ///
    /// Returns `None` when the deployment is no longer tracked by this view,
    /// in which case nothing is written.
    pub fn record_status(&mut self, deployment_id: &str, payload: StatusPayload) -> Option<Transition> {
        let previous = self.effective_status(deployment_id)?;
        let next = payload.status;
        self.snapshot.record(deployment_id, payload);

        let transition = Transition::observe(previous, next);
        if let Transition::Regressed { from, to } = transition {
            warn!(
                "Deployment {} reported {} after {}, applying server status",
                deployment_id, to, from
            );
        }
        Some(transition)
    }

    /// Move to another deployment page; returns whether the page changed
    pub fn set_page(&mut self, page: u32) -> Result<bool, ConsoleError> {
        if page == 0 {
            return Err(ConsoleError::ValidationError("Page numbers start at 1".to_string()));
        }
        if let Some(total) = self.pagination().map(|p| p.total_pages) {
            if total > 0 && page > total {
                return Err(ConsoleError::ValidationError(format!(
                    "Page {} is past the last page ({})",
                    page, total
                )));
            }
        }
        let changed = self.page != page;
        self.page = page;
        Ok(changed)
    }

    pub fn has_next_page(&self) -> bool {
        self.pagination().map(|p| p.has_next_page).unwrap_or(false)
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    /// Deployment list as rendered, with overlaid statuses
    pub fn rows(&self) -> Vec<DeploymentRow> {
        self.deployments()
            .iter()
            .map(|d| {
                let status = self.snapshot.effective_status(d);
                DeploymentRow {
                    id: d.id.clone(),
                    status,
                    label: status.label(),
                    selected: self.selected.as_deref() == Some(d.id.as_str()),
                    created_at: d.created_at,
                    commit_message: d.commit_message.clone(),
                }
            })
            .collect()
    }
}
