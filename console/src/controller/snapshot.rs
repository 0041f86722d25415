//! Deployment status snapshot overlay

use std::collections::HashMap;

use crate::models::deployment::{Deployment, DeploymentStatus, StatusPayload};

/// Latest polled status per deployment.
///
/// Entries take precedence over the status embedded in project data. Writes
/// touch a single key so results for different deployments never clobber
/// each other.
#[derive(Debug, Clone, Default)]
pub struct StatusSnapshot {
    entries: HashMap<String, StatusPayload>,
}

impl StatusSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, deployment_id: &str) -> Option<&StatusPayload> {
        self.entries.get(deployment_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlaid status of a deployment
    pub fn effective_status(&self, deployment: &Deployment) -> DeploymentStatus {
        self.entries
            .get(&deployment.id)
            .map(|p| p.status)
            .unwrap_or(deployment.status)
    }

    /// Store a polled payload, returning the previously overlaid status
    pub fn record(&mut self, deployment_id: &str, payload: StatusPayload) -> Option<DeploymentStatus> {
        self.entries
            .insert(deployment_id.to_string(), payload)
            .map(|previous| previous.status)
    }

    /// Optimistically mark a just-created deployment as queued
    pub fn seed_queued(&mut self, deployment_id: &str) {
        self.entries.insert(
            deployment_id.to_string(),
            StatusPayload::new(DeploymentStatus::Queued),
        );
    }

    /// IDs of deployments whose effective status still needs polling
    pub fn active_ids(&self, deployments: &[Deployment]) -> Vec<String> {
        deployments
            .iter()
            .filter(|d| self.effective_status(d).is_active())
            .map(|d| d.id.clone())
            .collect()
    }

    /// Reconcile with a freshly fetched page.
    ///
    /// Entries for deployments outside the page are pruned, and entries are
    /// dropped where the page already reports a terminal status.
    pub fn reconcile(&mut self, deployments: &[Deployment]) {
        self.entries.retain(|id, _| {
            deployments
                .iter()
                .find(|d| &d.id == id)
                .map(|d| !d.status.is_terminal())
                .unwrap_or(false)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn deployment(id: &str, status: DeploymentStatus) -> Deployment {
        Deployment {
            id: id.to_string(),
            status,
            created_at: Utc::now(),
            updated_at: None,
            sub_domain: None,
            commit_hash: None,
            commit_message: None,
        }
    }

    #[test]
    fn test_overlay_takes_precedence() {
        let mut snapshot = StatusSnapshot::new();
        let d = deployment("d1", DeploymentStatus::Queued);
        assert_eq!(snapshot.effective_status(&d), DeploymentStatus::Queued);

        snapshot.record("d1", StatusPayload::new(DeploymentStatus::Ready));
        assert_eq!(snapshot.effective_status(&d), DeploymentStatus::Ready);
        assert!(snapshot.active_ids(&[d]).is_empty());
    }

    #[test]
    fn test_record_returns_previous_status() {
        let mut snapshot = StatusSnapshot::new();
        assert_eq!(
            snapshot.record("d1", StatusPayload::new(DeploymentStatus::Queued)),
            None
        );
        assert_eq!(
            snapshot.record("d1", StatusPayload::new(DeploymentStatus::Deploying)),
            Some(DeploymentStatus::Queued)
        );
    }

    #[test]
    fn test_reconcile_prunes_and_defers_to_terminal_page_status() {
        let mut snapshot = StatusSnapshot::new();
        snapshot.seed_queued("gone");
        snapshot.seed_queued("settled");
        snapshot.record("running", StatusPayload::new(DeploymentStatus::Ready));

        snapshot.reconcile(&[
            deployment("settled", DeploymentStatus::Failed),
            deployment("running", DeploymentStatus::Deploying),
        ]);

        assert!(snapshot.get("gone").is_none());
        assert!(snapshot.get("settled").is_none());
        assert_eq!(
            snapshot.get("running").map(|p| p.status),
            Some(DeploymentStatus::Ready)
        );
    }
}
