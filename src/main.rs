use anyhow::Context;
use gameon_app::AppPaths;
use gameon_lib::bootstrap::{
    load_config_or_empty, resolve_app_dirs, resolve_config_path, run_app,
    tracing::init_tracing_subscriber,
};
use gameon_platform::DirsAppDirsAdapter;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let platform_dirs = DirsAppDirsAdapter::new();
    let config_path = resolve_config_path(&platform_dirs)?;
    let config = load_config_or_empty(&config_path)?;
    let app_dirs = resolve_app_dirs(&config, &platform_dirs)?;
    let paths = AppPaths::from_app_dirs(&app_dirs);

    init_tracing_subscriber(Some(&paths.logs_dir)).context("Failed to initialize tracing")?;
    info!(
        config = %config_path.display(),
        data_root = %app_dirs.app_data_root.display(),
        "starting gameon"
    );

    run_app(config, app_dirs).await
}
