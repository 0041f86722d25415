//! Interactive watch view run loop

use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::app::commands::WatchCommand;
use crate::app::options::WatchOptions;
use crate::controller::api::DeploymentApi;
use crate::controller::project::ProjectController;
use crate::errors::ConsoleError;
use crate::ui::confirm::PERMANENT_DELETE;
use crate::ui::notice::NoticeBoard;
use crate::ui::render::{render_watch, WATCH_HELP};
use crate::ui::terminal::TerminalViewport;
use crate::workers::{log_follower, status_poller};

/// Run the watch view of one project until `quit`, end of input, or the
/// shutdown signal
pub async fn run_watch<A, R, W>(
    api: Arc<A>,
    options: WatchOptions,
    base_domain: &str,
    input: R,
    output: &mut W,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ConsoleError>
where
    A: DeploymentApi + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    info!("Opening project {}...", options.project_id);

    let controller = Arc::new(ProjectController::with_follow_options(
        api,
        options.project_id.clone(),
        options.page_size,
        options.follow.clone(),
    ));
    if options.page > 1 {
        controller.set_page(options.page).await?;
    } else {
        controller.refresh_project().await?;
    }

    let viewport = Arc::new(TerminalViewport::new(options.viewport_height));

    let (shutdown_tx, _shutdown_rx): (broadcast::Sender<()>, _) = broadcast::channel(1);
    let mut shutdown_manager = ShutdownManager::new(shutdown_tx.clone(), options.max_shutdown_delay);

    init_status_poller(
        options.status_poller.clone(),
        controller.clone(),
        &mut shutdown_manager,
        shutdown_tx.subscribe(),
    )?;
    init_log_follower(
        controller.clone(),
        viewport.clone(),
        &mut shutdown_manager,
        shutdown_tx.subscribe(),
    )?;

    let mut notices = NoticeBoard::new(options.notices.clone());
    let mut session = WatchSession {
        controller: controller.as_ref(),
        viewport: viewport.as_ref(),
        pending_delete: None,
    };

    let result = event_loop(
        &mut session,
        &mut notices,
        base_domain,
        input,
        output,
        Box::pin(shutdown_signal),
    )
    .await;

    controller.teardown();
    drop(shutdown_tx);
    shutdown_manager.shutdown().await?;
    result
}

struct WatchSession<'a, A: DeploymentApi + ?Sized> {
    controller: &'a ProjectController<A>,
    viewport: &'a TerminalViewport,
    /// Deployment waiting for its typed delete confirmation
    pending_delete: Option<String>,
}

async fn event_loop<A, R, W>(
    session: &mut WatchSession<'_, A>,
    notices: &mut NoticeBoard,
    base_domain: &str,
    input: R,
    output: &mut W,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) -> Result<(), ConsoleError>
where
    A: DeploymentApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut revision = session.controller.subscribe();
    draw(session, notices, base_domain, output)?;

    loop {
        let expiry = notices.next_expiry();
        let expire = async {
            match expiry {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Shutdown signal received, closing watch view...");
                return Ok(());
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(());
                };
                if !session.handle_line(&line, notices).await {
                    return Ok(());
                }
            }
            changed = revision.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
            }
            _ = expire => {
                notices.prune();
            }
        }

        draw(session, notices, base_domain, output)?;
    }
}

fn draw<A, W>(
    session: &WatchSession<'_, A>,
    notices: &NoticeBoard,
    base_domain: &str,
    output: &mut W,
) -> Result<(), ConsoleError>
where
    A: DeploymentApi + ?Sized,
    W: Write,
{
    let screen = session
        .controller
        .with_view(|view| render_watch(view, notices, session.viewport, base_domain));
    write!(output, "\x1B[2J\x1B[H{}", screen)?;
    output.flush()?;
    Ok(())
}

impl<A: DeploymentApi + ?Sized> WatchSession<'_, A> {
    /// Handle one input line; returns `false` to close the view
    async fn handle_line(&mut self, line: &str, notices: &mut NoticeBoard) -> bool {
        if let Some(deployment_id) = self.pending_delete.take() {
            match self.controller.delete_deployment(&deployment_id, line).await {
                Ok(()) => notices.success(format!("Deployment {} deleted", deployment_id)),
                Err(e) => notices.error(&e),
            }
            return true;
        }

        let command = match line.parse::<WatchCommand>() {
            Ok(WatchCommand::Quit) => return false,
            Ok(command) => command,
            Err(e) => {
                notices.error(&e);
                return true;
            }
        };
        if let Err(e) = self.handle_command(command, notices).await {
            notices.error(&e);
        }
        true
    }

    async fn handle_command(
        &mut self,
        command: WatchCommand,
        notices: &mut NoticeBoard,
    ) -> Result<(), ConsoleError> {
        let controller = self.controller;
        match command {
            WatchCommand::Refresh => {
                controller.refresh_project().await?;
                notices.info("Refreshed");
            }
            WatchCommand::Deploy => {
                let id = controller.deploy().await?;
                notices.success(format!("Deployment {} started", id));
            }
            WatchCommand::Redeploy => {
                let id = controller.redeploy().await?;
                notices.success(format!("Deployment {} started", id));
            }
            WatchCommand::Select(id) => controller.select(&id)?,
            WatchCommand::NextPage => controller.next_page().await?,
            WatchCommand::PrevPage => controller.prev_page().await?,
            WatchCommand::Page(page) => controller.set_page(page).await?,
            WatchCommand::Logs => controller.request_log_refresh(),
            WatchCommand::ScrollUp(lines) => self.viewport.scroll_up(lines),
            WatchCommand::ScrollDown(lines) => self.viewport.scroll_down(lines),
            WatchCommand::Follow => self.viewport.follow(),
            WatchCommand::Delete(id) => {
                notices.info(format!(
                    "Type \"{}\" to delete deployment {}",
                    PERMANENT_DELETE, id
                ));
                self.pending_delete = Some(id);
            }
            WatchCommand::Help => notices.info(WATCH_HELP),
            WatchCommand::Quit => {}
        }
        Ok(())
    }
}

// =============================== INITIALIZATION ================================== //

fn init_status_poller<A: DeploymentApi + 'static>(
    options: status_poller::Options,
    controller: Arc<ProjectController<A>>,
    shutdown_manager: &mut ShutdownManager,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), ConsoleError> {
    info!("Initializing status poller...");

    let handle = tokio::spawn(async move {
        status_poller::run(
            &options,
            controller.as_ref(),
            tokio::time::sleep,
            Box::pin(async move {
                let _ = shutdown_rx.recv().await;
            }),
        )
        .await;
    });

    shutdown_manager.with_status_poller_handle(handle)
}

fn init_log_follower<A: DeploymentApi + 'static>(
    controller: Arc<ProjectController<A>>,
    viewport: Arc<TerminalViewport>,
    shutdown_manager: &mut ShutdownManager,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), ConsoleError> {
    info!("Initializing log follower...");

    let handle = tokio::spawn(async move {
        log_follower::run(
            controller.as_ref(),
            viewport.as_ref(),
            tokio::time::sleep,
            Box::pin(async move {
                let _ = shutdown_rx.recv().await;
            }),
        )
        .await;
    });

    shutdown_manager.with_log_follower_handle(handle)
}

// ================================= SHUTDOWN ===================================== //

struct ShutdownManager {
    shutdown_tx: broadcast::Sender<()>,
    max_shutdown_delay: Duration,
    status_poller_handle: Option<JoinHandle<()>>,
    log_follower_handle: Option<JoinHandle<()>>,
}

impl ShutdownManager {
    fn new(shutdown_tx: broadcast::Sender<()>, max_shutdown_delay: Duration) -> Self {
        Self {
            shutdown_tx,
            max_shutdown_delay,
            status_poller_handle: None,
            log_follower_handle: None,
        }
    }

    fn with_status_poller_handle(&mut self, handle: JoinHandle<()>) -> Result<(), ConsoleError> {
        if self.status_poller_handle.is_some() {
            return Err(ConsoleError::ShutdownError(
                "status_poller_handle already set".to_string(),
            ));
        }
        self.status_poller_handle = Some(handle);
        Ok(())
    }

    fn with_log_follower_handle(&mut self, handle: JoinHandle<()>) -> Result<(), ConsoleError> {
        if self.log_follower_handle.is_some() {
            return Err(ConsoleError::ShutdownError(
                "log_follower_handle already set".to_string(),
            ));
        }
        self.log_follower_handle = Some(handle);
        Ok(())
    }

    async fn shutdown(&mut self) -> Result<(), ConsoleError> {
        let _ = self.shutdown_tx.send(());

        match tokio::time::timeout(self.max_shutdown_delay, self.shutdown_impl()).await {
            Ok(result) => result,
            Err(_) => {
                error!(
                    "Shutdown timed out after {:?}, aborting workers...",
                    self.max_shutdown_delay
                );
                for handle in [&self.status_poller_handle, &self.log_follower_handle]
                    .into_iter()
                    .flatten()
                {
                    handle.abort();
                }
                Err(ConsoleError::ShutdownError("workers did not stop in time".to_string()))
            }
        }
    }

    async fn shutdown_impl(&mut self) -> Result<(), ConsoleError> {
        info!("Stopping watch workers...");

        if let Some(handle) = self.status_poller_handle.as_mut() {
            handle
                .await
                .map_err(|e| ConsoleError::ShutdownError(e.to_string()))?;
            self.status_poller_handle = None;
        }

        if let Some(handle) = self.log_follower_handle.as_mut() {
            handle
                .await
                .map_err(|e| ConsoleError::ShutdownError(e.to_string()))?;
            self.log_follower_handle = None;
        }

        info!("Shutdown complete");
        Ok(())
    }
}
