//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (documents, key-value, auth, clock) / 创建 infra 层具体实现
//! - ✅ Create platform implementations (geolocation, appearance, navigation, alerts) / 创建 platform 层具体实现
//! - ✅ Inject all dependencies into AppDeps / 将所有依赖注入到 AppDeps
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! - Do not decide which route a signed-out user lands on
//! - 不判断未登录用户应跳转到哪个页面
//!
//! ## Architecture Principle / 架构原则
//!
//! > **This is the only place allowed to depend on gameon-infra + gameon-platform + gameon-app simultaneously.**
//! > **这是唯一允许同时依赖 gameon-infra、gameon-platform 和 gameon-app 的地方。**

use std::sync::Arc;

use gameon_app::{AppDeps, AppPaths};
use gameon_core::app_dirs::AppDirs;
use gameon_core::config::AppConfig;
use gameon_core::ports::AppDirsPort;
use gameon_core::Route;
use gameon_infra::{FileKeyValueStore, JsonFileDocumentStore, LocalAuthProvider, SystemClock};
use gameon_platform::{ConfiguredGeolocation, ConsoleNotices, ManualAppearance, StackNavigator};
use tracing::info;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("App directory resolution failed: {0}")]
    AppDirs(String),

    #[error("Auth provider initialization failed: {0}")]
    AuthInit(String),
}

/// Concrete platform adapters the shell drives directly.
///
/// The same instances sit behind the ports in [`AppDeps`].
#[derive(Clone)]
pub struct ShellAdapters {
    pub navigation: Arc<StackNavigator>,
    pub notices: Arc<ConsoleNotices>,
    pub appearance: Arc<ManualAppearance>,
}

pub struct WiredDependencies {
    pub deps: AppDeps,
    pub paths: AppPaths,
    pub adapters: ShellAdapters,
}

/// `[storage] data_dir` when set, otherwise the platform data root.
pub fn resolve_app_dirs(
    config: &AppConfig,
    platform_dirs: &dyn AppDirsPort,
) -> WiringResult<AppDirs> {
    if !config.data_dir.as_os_str().is_empty() {
        return Ok(AppDirs {
            app_data_root: config.data_dir.clone(),
        });
    }
    platform_dirs
        .get_app_dirs()
        .map_err(|e| WiringError::AppDirs(e.to_string()))
}

/// Wire all dependencies together.
/// 将所有依赖连接在一起。
///
/// # Errors / 错误
///
/// Returns `WiringError::AuthInit` if the account file exists but cannot be
/// read or parsed.
pub async fn wire_dependencies(
    config: &AppConfig,
    app_dirs: &AppDirs,
) -> WiringResult<WiredDependencies> {
    let paths = AppPaths::from_app_dirs(app_dirs);

    // Infra / 基础设施
    let auth = LocalAuthProvider::open(&paths.accounts_path)
        .await
        .map_err(|e| WiringError::AuthInit(format!("{e:#}")))?;
    let documents = JsonFileDocumentStore::new(&paths.documents_dir);
    let local_settings = FileKeyValueStore::new(&paths.local_settings_path);

    // Platform / 平台
    let adapters = ShellAdapters {
        navigation: Arc::new(StackNavigator::new(Route::Home)),
        notices: Arc::new(ConsoleNotices::default()),
        appearance: Arc::new(ManualAppearance::from_config(&config.os_scheme)),
    };
    let geolocation = ConfiguredGeolocation::from_config(&config.location);

    let deps = AppDeps {
        auth: Arc::new(auth),
        documents: Arc::new(documents),
        local_settings: Arc::new(local_settings),
        geolocation: Arc::new(geolocation),
        appearance: adapters.appearance.clone(),
        navigation: adapters.navigation.clone(),
        notices: adapters.notices.clone(),
        clock: Arc::new(SystemClock),
    };

    info!(data_root = %app_dirs.app_data_root.display(), "dependencies wired");
    Ok(WiredDependencies {
        deps,
        paths,
        adapters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameon_core::ports::{AppearancePort, AuthPort, NavigationPort};
    use gameon_core::ColorScheme;
    use gameon_platform::DirsAppDirsAdapter;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_wiring_error_display() {
        let err = WiringError::AuthInit("parse accounts failed".to_string());
        assert!(err.to_string().contains("Auth provider initialization"));
        assert!(err.to_string().contains("parse accounts failed"));
    }

    #[test]
    fn test_configured_data_dir_wins_over_platform_root() {
        let platform = DirsAppDirsAdapter::with_base_data_local_dir(PathBuf::from("/platform"));
        let mut config = AppConfig::empty();

        let fallback = resolve_app_dirs(&config, &platform).unwrap();
        assert!(fallback.app_data_root.starts_with("/platform"));

        config.data_dir = PathBuf::from("/custom/data");
        let configured = resolve_app_dirs(&config, &platform).unwrap();
        assert_eq!(configured.app_data_root, PathBuf::from("/custom/data"));
    }

    #[tokio::test]
    async fn test_wire_dependencies_uses_data_root_and_config() {
        let dir = TempDir::new().unwrap();
        let dirs = AppDirs {
            app_data_root: dir.path().to_path_buf(),
        };
        let mut config = AppConfig::empty();
        config.os_scheme = "dark".to_string();

        let wired = wire_dependencies(&config, &dirs).await.unwrap();

        assert_eq!(wired.paths.accounts_path, dir.path().join("accounts.json"));
        assert_eq!(wired.deps.appearance.current_scheme(), Some(ColorScheme::Dark));
        assert_eq!(wired.deps.navigation.current_route(), Route::Home);
        assert!(wired.deps.auth.current_user().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_account_file_fails_wiring() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("accounts.json"), "{ nope").unwrap();
        let dirs = AppDirs {
            app_data_root: dir.path().to_path_buf(),
        };

        let err = wire_dependencies(&AppConfig::empty(), &dirs)
            .await
            .err()
            .unwrap();

        assert!(matches!(err, WiringError::AuthInit(_)));
    }
}
