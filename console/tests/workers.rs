//! Polling worker tests on paused time

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{lines, project, FakeApi, FixedViewport};
use lang_console::controller::project::ProjectController;
use lang_console::models::deployment::DeploymentStatus::*;
use lang_console::workers::{log_follower, status_poller};
use tokio::sync::oneshot;
use tokio::time::sleep;

async fn open(api: &Arc<FakeApi>) -> Arc<ProjectController<FakeApi>> {
    let controller = Arc::new(ProjectController::new(api.clone(), "p1", 10));
    controller.refresh_project().await.unwrap();
    controller
}

#[tokio::test(start_paused = true)]
async fn test_status_poller_stops_polling_settled_deployments() {
    let api = Arc::new(FakeApi::with_page(project("p1", &[("d1", Deploying)], 1, 1)));
    let controller = open(&api).await;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let worker = controller.clone();
    let handle = tokio::spawn(async move {
        status_poller::run(
            &status_poller::Options::default(),
            worker.as_ref(),
            sleep,
            Box::pin(async move {
                let _ = shutdown_rx.await;
            }),
        )
        .await;
    });

    sleep(Duration::from_millis(100)).await;
    assert_eq!(api.status_calls().len(), 1);

    sleep(Duration::from_millis(3000)).await;
    assert_eq!(api.status_calls().len(), 2);

    api.set_status("d1", Ready);
    sleep(Duration::from_millis(3000)).await;
    assert_eq!(api.status_calls().len(), 3);

    sleep(Duration::from_millis(9000)).await;
    assert_eq!(api.status_calls().len(), 3);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_status_poller_exits_on_teardown() {
    let api = Arc::new(FakeApi::with_page(project("p1", &[("d1", Queued)], 1, 1)));
    let controller = open(&api).await;

    let worker = controller.clone();
    let handle = tokio::spawn(async move {
        status_poller::run(
            &status_poller::Options::default(),
            worker.as_ref(),
            sleep,
            Box::pin(std::future::pending()),
        )
        .await;
    });

    sleep(Duration::from_millis(100)).await;
    controller.teardown();
    sleep(Duration::from_millis(3000)).await;
    assert!(handle.is_finished());
    assert_eq!(api.status_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_log_follower_follows_active_then_fetches_once() {
    let api = Arc::new(FakeApi::with_page(project("p1", &[("d1", Deploying)], 1, 1)));
    api.set_logs("d1", lines(&["install", "build"]));
    let controller = open(&api).await;
    let viewport = Arc::new(FixedViewport::new(0.0));

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let (worker, worker_viewport) = (controller.clone(), viewport.clone());
    let handle = tokio::spawn(async move {
        log_follower::run(
            worker.as_ref(),
            worker_viewport.as_ref(),
            sleep,
            Box::pin(async move {
                let _ = shutdown_rx.await;
            }),
        )
        .await;
    });

    // first fetch, then a scroll once layout settled
    sleep(Duration::from_millis(150)).await;
    assert_eq!(api.log_calls(), 1);
    assert_eq!(viewport.scrolls(), 1);
    assert!(controller.with_view(|v| v.logs().is_loaded()));

    // refetched every interval while active; same content, no scroll
    sleep(Duration::from_millis(3100)).await;
    assert_eq!(api.log_calls(), 2);
    assert_eq!(viewport.scrolls(), 1);

    // terminal status wakes the follower for one last fetch
    api.set_status("d1", Ready);
    controller.poll_statuses().await;
    sleep(Duration::from_millis(10)).await;
    assert_eq!(api.log_calls(), 3);

    sleep(Duration::from_millis(10_000)).await;
    assert_eq!(api.log_calls(), 3);

    controller.request_log_refresh();
    sleep(Duration::from_millis(10)).await;
    assert_eq!(api.log_calls(), 4);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_log_follower_fetches_new_selection() {
    let api = Arc::new(FakeApi::with_page(project(
        "p1",
        &[("d2", Ready), ("d1", Failed)],
        1,
        1,
    )));
    api.set_logs("d2", lines(&["ok"]));
    api.set_logs("d1", lines(&["error: build failed"]));
    let controller = open(&api).await;
    let viewport = Arc::new(FixedViewport::new(1000.0));

    let (worker, worker_viewport) = (controller.clone(), viewport.clone());
    let handle = tokio::spawn(async move {
        log_follower::run(
            worker.as_ref(),
            worker_viewport.as_ref(),
            sleep,
            Box::pin(std::future::pending()),
        )
        .await;
    });

    sleep(Duration::from_millis(10)).await;
    assert_eq!(api.log_calls(), 1);

    controller.select("d1").unwrap();
    sleep(Duration::from_millis(10)).await;
    assert_eq!(api.log_calls(), 2);
    assert_eq!(
        controller.with_view(|v| v.logs().entries().to_vec()),
        lines(&["error: build failed"])
    );
    // reader was far from the bottom
    assert_eq!(viewport.scrolls(), 0);

    controller.teardown();
    sleep(Duration::from_millis(10)).await;
    assert!(handle.is_finished());
}
