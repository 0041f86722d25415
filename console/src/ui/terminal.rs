//! Scrollable log viewport for the terminal watch view

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::controller::logs::Viewport;
use crate::models::deployment::LogEntry;

/// Distance units covered by one transcript line
pub const LINE_HEIGHT: f64 = 20.0;

/// Window of `height` transcript lines.
///
/// The window is anchored at its first line, so new entries arriving while
/// the user reads history do not move it. Following the tail only happens
/// through [`Viewport::scroll_to_latest`] or [`TerminalViewport::follow`].
#[derive(Debug)]
pub struct TerminalViewport {
    height: usize,
    first_line: AtomicUsize,
    content_len: AtomicUsize,
    pin_to_tail: AtomicBool,
}

impl TerminalViewport {
    pub fn new(height: usize) -> Self {
        Self {
            height: height.max(1),
            first_line: AtomicUsize::new(0),
            content_len: AtomicUsize::new(0),
            pin_to_tail: AtomicBool::new(true),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn first_line(&self) -> usize {
        self.first_line.load(Ordering::SeqCst)
    }

    fn last_start(&self, len: usize) -> usize {
        len.saturating_sub(self.height)
    }

    pub fn scroll_up(&self, lines: usize) {
        let first = self.first_line().saturating_sub(lines);
        self.first_line.store(first, Ordering::SeqCst);
    }

    pub fn scroll_down(&self, lines: usize) {
        let max = self.last_start(self.content_len.load(Ordering::SeqCst));
        let first = (self.first_line() + lines).min(max);
        self.first_line.store(first, Ordering::SeqCst);
    }

    /// Jump to the newest entry on the next render
    pub fn follow(&self) {
        self.pin_to_tail.store(true, Ordering::SeqCst);
    }

    /// Slice of `entries` visible in the window, applying a pending jump
    pub fn window<'a>(&self, entries: &'a [LogEntry]) -> &'a [LogEntry] {
        let len = entries.len();
        self.content_len.store(len, Ordering::SeqCst);

        let first = if self.pin_to_tail.swap(false, Ordering::SeqCst) {
            self.last_start(len)
        } else {
            self.first_line().min(self.last_start(len))
        };
        self.first_line.store(first, Ordering::SeqCst);

        let end = (first + self.height).min(len);
        &entries[first..end]
    }
}

impl Viewport for TerminalViewport {
    fn distance_from_bottom(&self) -> f64 {
        let len = self.content_len.load(Ordering::SeqCst);
        let visible_end = self.first_line() + self.height;
        len.saturating_sub(visible_end) as f64 * LINE_HEIGHT
    }

    fn scroll_to_latest(&self) {
        self.follow();
    }
}
