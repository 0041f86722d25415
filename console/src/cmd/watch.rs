use lang_console::app::options::WatchOptions;
use lang_console::app::run::run_watch;
use lang_console::app::state::AppState;
use lang_console::errors::ConsoleError;
use tokio::io::BufReader;

/// Interactive view over stdin/stdout until `quit` or Ctrl+C
pub async fn cmd_watch(state: &AppState, project_id: &str, page: u32) -> Result<(), ConsoleError> {
    let mut options = WatchOptions::new(project_id);
    options.page = page.max(1);

    let input = BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();
    run_watch(
        state.http_client.clone(),
        options,
        &state.settings.backend.base_domain,
        input,
        &mut output,
        crate::await_shutdown_signal(),
    )
    .await
}
