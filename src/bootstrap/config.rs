//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Locate the TOML configuration file / 定位 TOML 配置文件
//! - ✅ Parse TOML into AppConfig DTO / 将 TOML 解析为 AppConfig DTO
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**
//!
//! ## Iron Rule / 铁律
//!
//! > **Pure data loading only. Accept whatever is in the file.**
//! > **仅纯数据加载。接受文件中的任何内容。**

use std::path::{Path, PathBuf};

use anyhow::Context;
use gameon_core::config::AppConfig;
use gameon_core::ports::AppDirsPort;
use tracing::debug;

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "GAMEON_CONFIG";

pub const CONFIG_FILE_NAME: &str = "gameon.toml";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// **NO validation is performed**: empty strings and missing sections are
/// facts, mapped to empty values.
/// **不执行任何验证**：空字符串和缺失的部分是事实，映射为空值。
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
/// 无法读取文件或内容不是有效的 TOML 时返回错误。
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Like [`load_config`], but a missing file yields [`AppConfig::empty`].
/// 与 [`load_config`] 相同，但文件不存在时返回空配置。
pub fn load_config_or_empty(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        debug!(path = %config_path.display(), "no config file, using empty config");
        return Ok(AppConfig::empty());
    }
    load_config(config_path.to_path_buf())
}

/// `$GAMEON_CONFIG` when set, otherwise `gameon.toml` under the platform data root.
pub fn resolve_config_path(app_dirs: &dyn AppDirsPort) -> anyhow::Result<PathBuf> {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => {
            let dirs = app_dirs
                .get_app_dirs()
                .context("Failed to resolve app data directory")?;
            Ok(dirs.app_data_root.join(CONFIG_FILE_NAME))
        }
    }
}
