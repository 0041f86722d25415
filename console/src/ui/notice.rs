//! Transient inline notices

use std::time::Duration;

use tokio::time::Instant;

use crate::errors::ConsoleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// Notice lifetimes
#[derive(Debug, Clone)]
pub struct NoticeOptions {
    pub ttl: Duration,
    pub error_ttl: Duration,
}

impl Default for NoticeOptions {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(3000),
            error_ttl: Duration::from_millis(5000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub expires_at: Instant,
}

/// Notices shown above the view until they expire
#[derive(Debug, Default)]
pub struct NoticeBoard {
    options: NoticeOptions,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new(options: NoticeOptions) -> Self {
        Self {
            options,
            notices: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>) {
        let ttl = match kind {
            NoticeKind::Error => self.options.error_ttl,
            _ => self.options.ttl,
        };
        self.notices.push(Notice {
            kind,
            text: text.into(),
            expires_at: Instant::now() + ttl,
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NoticeKind::Info, text);
    }

    pub fn error(&mut self, error: &ConsoleError) {
        self.push(NoticeKind::Error, error.user_message());
    }

    /// Drop expired notices; returns whether any were removed
    pub fn prune(&mut self) -> bool {
        let now = Instant::now();
        let before = self.notices.len();
        self.notices.retain(|n| n.expires_at > now);
        self.notices.len() != before
    }

    /// Notices still showing, oldest first
    pub fn active(&self) -> impl Iterator<Item = &Notice> {
        let now = Instant::now();
        self.notices.iter().filter(move |n| n.expires_at > now)
    }

    /// Time until the next notice expires
    pub fn next_expiry(&self) -> Option<Instant> {
        self.notices.iter().map(|n| n.expires_at).min()
    }
}
