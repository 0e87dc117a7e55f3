use std::path::PathBuf;

use gameon_core::app_dirs::AppDirs;

/// Concrete file locations under the application data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub documents_dir: PathBuf,
    pub local_settings_path: PathBuf,
    pub accounts_path: PathBuf,
    pub config_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn from_app_dirs(dirs: &AppDirs) -> Self {
        Self {
            documents_dir: dirs.app_data_root.join("documents"),
            local_settings_path: dirs.app_data_root.join("local_settings.json"),
            accounts_path: dirs.app_data_root.join("accounts.json"),
            config_path: dirs.app_data_root.join("gameon.toml"),
            logs_dir: dirs.app_data_root.join("logs"),
        }
    }
}
