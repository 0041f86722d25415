//! Scripted deployment backend shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::{oneshot, Notify};

use lang_console::controller::api::DeploymentApi;
use lang_console::controller::logs::Viewport;
use lang_console::errors::ConsoleError;
use lang_console::models::deployment::{DeploymentStatus, LogEntry, StatusPayload};
use lang_console::models::project::Project;
use openapi_client::models::{DeployResponse, PageQuery};

/// Build a project page through the wire format
pub fn project(id: &str, deployments: &[(&str, DeploymentStatus)], page: u32, total_pages: u32) -> Project {
    let deployments: Vec<_> = deployments
        .iter()
        .enumerate()
        .map(|(i, (id, status))| {
            json!({
                "id": id,
                "status": status.as_wire_str(),
                "createdAt": format!("2026-10-01T12:{:02}:00Z", 59 - i),
                "commitMessage": format!("commit {}", id),
            })
        })
        .collect();

    serde_json::from_value(json!({
        "id": id,
        "name": "site",
        "gitUrl": "https://github.com/acme/site.git",
        "subDomain": "site",
        "deployments": deployments,
        "deploymentsPagination": {
            "page": page,
            "totalPages": total_pages,
            "hasNextPage": page < total_pages,
            "hasPrevPage": page > 1,
        },
    }))
    .unwrap()
}

pub fn lines(texts: &[&str]) -> Vec<LogEntry> {
    texts.iter().map(|t| LogEntry::new(*t)).collect()
}

#[derive(Default)]
pub struct FakeApi {
    /// Project page served per page number
    pub pages: Mutex<HashMap<u32, Project>>,
    pub statuses: Mutex<HashMap<String, DeploymentStatus>>,
    pub logs: Mutex<HashMap<String, Vec<LogEntry>>>,
    /// Deployments whose status fetch fails
    pub failing: Mutex<HashSet<String>>,

    pub project_calls: AtomicUsize,
    pub status_calls: Mutex<Vec<String>>,
    pub log_calls: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,

    /// ID handed out by the next deploy or redeploy
    pub next_deployment: Mutex<Option<String>>,
    pub redeployed: AtomicBool,

    /// Hold the next fetch of a page until the sender fires
    pub project_gates: Mutex<HashMap<u32, oneshot::Receiver<()>>>,
    /// Hold the next status fetch of a deployment until the sender fires
    pub status_gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    /// Hold the next log fetch until the sender fires
    pub log_gate: Mutex<Option<oneshot::Receiver<()>>>,
    /// Notified when a gated fetch is waiting
    pub entered: Notify,
}

impl FakeApi {
    pub fn with_page(project: Project) -> Self {
        let api = Self::default();
        api.set_page(project);
        api
    }

    pub fn set_page(&self, project: Project) {
        let page = project
            .deployments_pagination
            .as_ref()
            .map(|p| p.page)
            .unwrap_or(1);
        for d in &project.deployments {
            self.statuses
                .lock()
                .unwrap()
                .entry(d.id.clone())
                .or_insert(d.status);
        }
        self.pages.lock().unwrap().insert(page, project);
    }

    pub fn set_status(&self, id: &str, status: DeploymentStatus) {
        self.statuses.lock().unwrap().insert(id.to_string(), status);
    }

    pub fn set_logs(&self, id: &str, entries: Vec<LogEntry>) {
        self.logs.lock().unwrap().insert(id.to_string(), entries);
    }

    pub fn gate_page(&self, page: u32) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.project_gates.lock().unwrap().insert(page, rx);
        tx
    }

    pub fn gate_status(&self, id: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.status_gates.lock().unwrap().insert(id.to_string(), rx);
        tx
    }

    pub fn gate_logs(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.log_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn status_calls(&self) -> Vec<String> {
        self.status_calls.lock().unwrap().clone()
    }

    pub fn log_calls(&self) -> usize {
        self.log_calls.lock().unwrap().len()
    }

    fn start_deployment(&self, project_id: &str) -> Result<DeployResponse, ConsoleError> {
        let id = self
            .next_deployment
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| ConsoleError::Internal("no deployment scripted".to_string()))?;

        let mut pages = self.pages.lock().unwrap();
        let listed: Vec<(String, DeploymentStatus)> = pages
            .get(&1)
            .map(|p| p.deployments.iter().map(|d| (d.id.clone(), d.status)).collect())
            .unwrap_or_default();
        let mut deployments: Vec<(&str, DeploymentStatus)> = vec![(id.as_str(), DeploymentStatus::Queued)];
        deployments.extend(listed.iter().map(|(id, s)| (id.as_str(), *s)));
        pages.insert(1, project(project_id, &deployments, 1, 1));
        drop(pages);

        self.set_status(&id, DeploymentStatus::Queued);
        Ok(DeployResponse { deployment_id: id })
    }
}

#[async_trait]
impl DeploymentApi for FakeApi {
    async fn fetch_project(&self, _project_id: &str, page: PageQuery) -> Result<Project, ConsoleError> {
        self.project_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.project_gates.lock().unwrap().remove(&page.page);
        if let Some(rx) = gate {
            self.entered.notify_one();
            let _ = rx.await;
        }
        self.pages
            .lock()
            .unwrap()
            .get(&page.page)
            .cloned()
            .ok_or_else(|| ConsoleError::NotFound("Project not found".to_string()))
    }

    async fn fetch_status(&self, deployment_id: &str) -> Result<StatusPayload, ConsoleError> {
        self.status_calls.lock().unwrap().push(deployment_id.to_string());
        let gate = self.status_gates.lock().unwrap().remove(deployment_id);
        if let Some(rx) = gate {
            self.entered.notify_one();
            let _ = rx.await;
        }
        if self.failing.lock().unwrap().contains(deployment_id) {
            return Err(ConsoleError::ApiError {
                status: 500,
                message: "status unavailable".to_string(),
            });
        }
        self.statuses
            .lock()
            .unwrap()
            .get(deployment_id)
            .copied()
            .map(StatusPayload::new)
            .ok_or_else(|| ConsoleError::NotFound("Deployment not found".to_string()))
    }

    async fn fetch_logs(&self, deployment_id: &str) -> Result<Vec<LogEntry>, ConsoleError> {
        self.log_calls.lock().unwrap().push(deployment_id.to_string());
        let gate = self.log_gate.lock().unwrap().take();
        if let Some(rx) = gate {
            self.entered.notify_one();
            let _ = rx.await;
        }
        Ok(self
            .logs
            .lock()
            .unwrap()
            .get(deployment_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn deploy(&self, project_id: &str) -> Result<DeployResponse, ConsoleError> {
        self.start_deployment(project_id)
    }

    async fn redeploy(&self, project_id: &str) -> Result<DeployResponse, ConsoleError> {
        self.redeployed.store(true, Ordering::SeqCst);
        self.start_deployment(project_id)
    }

    async fn delete_deployment(&self, deployment_id: &str) -> Result<(), ConsoleError> {
        self.deleted.lock().unwrap().push(deployment_id.to_string());
        Ok(())
    }
}

/// Viewport parked at a fixed distance from the bottom
pub struct FixedViewport {
    pub distance: f64,
    pub scrolls: AtomicUsize,
}

impl FixedViewport {
    pub fn new(distance: f64) -> Self {
        Self {
            distance,
            scrolls: AtomicUsize::new(0),
        }
    }

    pub fn scrolls(&self) -> usize {
        self.scrolls.load(Ordering::SeqCst)
    }
}

impl Viewport for FixedViewport {
    fn distance_from_bottom(&self) -> f64 {
        self.distance
    }

    fn scroll_to_latest(&self) {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
    }
}
