//! Watch view configuration options

use std::time::Duration;

use crate::controller::logs::FollowOptions;
use crate::http::projects::DEPLOYMENTS_PAGE_SIZE;
use crate::ui::notice::NoticeOptions;
use crate::workers::status_poller;

/// Options of the interactive deployment view
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub project_id: String,

    /// Deployment page to open on
    pub page: u32,

    pub page_size: u32,

    /// Status polling worker options
    pub status_poller: status_poller::Options,

    /// Log following options
    pub follow: FollowOptions,

    pub notices: NoticeOptions,

    /// Transcript lines shown at once
    pub viewport_height: usize,

    /// Maximum delay for graceful shutdown of the workers
    pub max_shutdown_delay: Duration,
}

impl WatchOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            page: 1,
            page_size: DEPLOYMENTS_PAGE_SIZE,
            status_poller: status_poller::Options::default(),
            follow: FollowOptions::default(),
            notices: NoticeOptions::default(),
            viewport_height: 20,
            max_shutdown_delay: Duration::from_secs(5),
        }
    }
}
