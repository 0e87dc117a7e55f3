use std::sync::Arc;

use gameon_app::App;
use gameon_core::app_dirs::AppDirs;
use gameon_core::config::AppConfig;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::wiring::wire_dependencies;
use crate::shell::Shell;

/// Wires the app, starts its background tasks and drives the shell on
/// stdin/stdout until end of input, `quit` or Ctrl-C.
pub async fn run_app(config: AppConfig, app_dirs: AppDirs) -> anyhow::Result<()> {
    let wired = wire_dependencies(&config, &app_dirs).await?;
    let app = Arc::new(App::new(wired.deps));

    let shutdown = CancellationToken::new();
    let tasks = app.start(shutdown.clone()).await;

    let mut shell = Shell::new(app.clone(), wired.adapters, std::io::stdout());
    let input = BufReader::new(tokio::io::stdin());
    tokio::select! {
        result = shell.run(input) => result?,
        _ = tokio::signal::ctrl_c() => info!("interrupted"),
    }

    shutdown.cancel();
    tasks.join().await;
    info!("shut down");
    Ok(())
}
