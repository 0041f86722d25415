//! Watch view driven by scripted input

mod common;

use std::sync::Arc;

use common::{lines, project, FakeApi};
use lang_console::app::options::WatchOptions;
use lang_console::app::run::run_watch;
use lang_console::models::deployment::DeploymentStatus::*;
use tokio::io::BufReader;

async fn watch(api: &Arc<FakeApi>, script: &'static str) -> String {
    colored::control::set_override(false);
    let mut output = Vec::new();
    run_watch(
        api.clone(),
        WatchOptions::new("p1"),
        "lang.dev",
        BufReader::new(script.as_bytes()),
        &mut output,
        std::future::pending(),
    )
    .await
    .unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_commands_update_the_screen() {
    let api = Arc::new(FakeApi::with_page(project(
        "p1",
        &[("d2", Ready), ("d1", Failed)],
        1,
        1,
    )));
    api.set_logs("d1", lines(&["error: missing build script"]));

    let screen = watch(&api, "select d1\nlogs\nbogus\nquit\nselect d2\n").await;

    assert!(screen.contains("https://site.lang.dev"));
    assert!(screen.contains("Deployments (page 1 of 1)"));
    assert!(screen.contains("> d1"));
    assert!(screen.contains("Unknown command: bogus"));
    // input after quit is not read
    let last_frame = screen.rsplit("\x1B[2J\x1B[H").next().unwrap();
    assert!(last_frame.contains("> d1"));
}

#[tokio::test]
async fn test_delete_asks_for_phrase() {
    let api = Arc::new(FakeApi::with_page(project("p1", &[("d1", Failed)], 1, 1)));

    let screen = watch(&api, "delete d1\ndelete\ndelete d1\npermanently delete\n").await;

    assert!(screen.contains("Type \"permanently delete\" to delete deployment d1"));
    assert!(screen.contains("Type \"permanently delete\" to confirm"));
    assert!(screen.contains("Deployment d1 deleted"));
    assert_eq!(*api.deleted.lock().unwrap(), vec!["d1"]);
}

#[tokio::test]
async fn test_redeploy_from_watch() {
    let api = Arc::new(FakeApi::with_page(project("p1", &[("d1", Ready)], 1, 1)));
    *api.next_deployment.lock().unwrap() = Some("d2".to_string());

    let screen = watch(&api, "redeploy\n").await;

    assert!(screen.contains("Deployment d2 started"));
    assert!(screen.contains("> d2"));
}

#[tokio::test]
async fn test_end_of_input_closes_view() {
    let api = Arc::new(FakeApi::with_page(project("p1", &[], 1, 1)));
    let screen = watch(&api, "").await;
    assert!(screen.contains("No deployments yet"));
}
