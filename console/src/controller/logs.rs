//! Log transcript of the selected deployment

use std::time::Duration;

use crate::models::deployment::{DeploymentStatus, LogEntry};

/// Scroll surface the transcript is shown in
pub trait Viewport: Send + Sync {
    /// Distance between the visible bottom edge and the end of the transcript
    fn distance_from_bottom(&self) -> f64;

    /// Bring the newest entry into view
    fn scroll_to_latest(&self);
}

/// Log following constants
#[derive(Debug, Clone)]
pub struct FollowOptions {
    /// Refetch interval while the deployment is active
    pub interval: Duration,

    /// Auto-scroll only when the viewport is closer than this to the bottom
    pub near_bottom_threshold: f64,

    /// Layout settling time before scrolling
    pub settle_delay: Duration,
}

impl Default for FollowOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(3000),
            near_bottom_threshold: 200.0,
            settle_delay: Duration::from_millis(100),
        }
    }
}

impl FollowOptions {
    /// Polling interval for a status; `None` means fetch once and stop
    pub fn interval_for(&self, status: DeploymentStatus) -> Option<Duration> {
        status.is_active().then_some(self.interval)
    }
}

/// Result of applying a fetched transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogUpdate {
    /// Same content as held; nothing was written
    Unchanged,

    Replaced {
        previous_len: usize,
        len: usize,
        /// Scroll to the newest entry once layout settles
        autoscroll: bool,
    },
}

/// Full-replace transcript buffer for one deployment
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    deployment_id: Option<String>,
    entries: Vec<LogEntry>,
    loaded: bool,
}

impl LogBuffer {
    pub fn deployment_id(&self) -> Option<&str> {
        self.deployment_id.as_deref()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// At least one fetch has completed for the current deployment
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Point the buffer at another deployment, discarding held entries
    pub fn reset(&mut self, deployment_id: Option<String>) {
        if self.deployment_id != deployment_id {
            self.deployment_id = deployment_id;
            self.entries.clear();
            self.loaded = false;
        }
    }

    /// Apply a fetched transcript.
    ///
    /// Content equal to what is held is not written. Auto-scroll is requested
    /// only when the transcript grew and the viewport sat within `threshold`
    /// of the bottom.
    pub fn apply(
        &mut self,
        entries: Vec<LogEntry>,
        distance_from_bottom: f64,
        threshold: f64,
    ) -> LogUpdate {
        self.loaded = true;
        if entries == self.entries {
            return LogUpdate::Unchanged;
        }

        let previous_len = self.entries.len();
        let len = entries.len();
        self.entries = entries;

        LogUpdate::Replaced {
            previous_len,
            len,
            autoscroll: len > previous_len && distance_from_bottom < threshold,
        }
    }
}
