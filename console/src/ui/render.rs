//! Text rendering of the watch view

use std::fmt::Write;

use colored::Colorize;

use crate::controller::view::ProjectView;
use crate::ui::badge::status_badge;
use crate::ui::notice::{NoticeBoard, NoticeKind};
use crate::ui::terminal::TerminalViewport;

pub const WATCH_HELP: &str = "commands: refresh | deploy | redeploy | select <id> | next | prev | \
logs | up [n] | down [n] | follow | delete <id> | help | quit";

/// Render the project view, notices and visible transcript lines
pub fn render_watch(
    view: &ProjectView,
    notices: &NoticeBoard,
    viewport: &TerminalViewport,
    base_domain: &str,
) -> String {
    let mut out = String::new();

    match view.project() {
        Some(project) => {
            let _ = writeln!(out, "{}  {}", project.name.bold(), project.git_url.dimmed());
            if let Some(url) = project.url(base_domain) {
                let _ = writeln!(out, "{}", url.underline());
            }
        }
        None => {
            let _ = writeln!(out, "Loading project {}...", view.project_id());
        }
    }

    let pages = view.pagination().map(|p| p.total_pages.max(1)).unwrap_or(1);
    let _ = writeln!(out, "\nDeployments (page {} of {})", view.page(), pages);
    let rows = view.rows();
    if rows.is_empty() {
        let _ = writeln!(out, "  No deployments yet");
    }
    for row in rows {
        let marker = if row.selected { ">" } else { " " };
        let _ = writeln!(
            out,
            "{} {} {} {} {}",
            marker,
            row.id,
            status_badge(row.status),
            row.created_at.format("%Y-%m-%d %H:%M"),
            row.commit_message.as_deref().unwrap_or("")
        );
    }

    for notice in notices.active() {
        let text = match notice.kind {
            NoticeKind::Success => notice.text.green(),
            NoticeKind::Info => notice.text.normal(),
            NoticeKind::Error => notice.text.red(),
        };
        let _ = writeln!(out, "\n{}", text);
    }

    if let Some(id) = view.selected_id() {
        let logs = view.logs();
        let _ = writeln!(out, "\nLogs of {}", id);
        if !logs.is_loaded() {
            let _ = writeln!(out, "  Loading logs...");
        } else if logs.is_empty() {
            let _ = writeln!(out, "  No logs yet");
        }
        for entry in viewport.window(logs.entries()) {
            let _ = writeln!(out, "  {}", entry.render());
        }
    }

    out
}
