//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic or policies / 禁止任何业务逻辑或策略**
//! ❌ **No validation logic / 禁止验证逻辑**
//!
//! Missing keys map to empty values. Interpreting them (for example an
//! empty `data_dir` meaning "use the platform data directory") is the
//! bootstrap's job.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Data root override (empty = platform default)
    /// 数据目录覆盖（空 = 平台默认目录）
    pub data_dir: PathBuf,

    /// OS appearance reported to the theme resolver ("light", "dark" or empty)
    pub os_scheme: String,

    /// Fixed device location used by the headless geolocation provider
    pub location: LocationConfig,
}

/// `[location]` section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub permission_granted: bool,
    pub name: String,
    pub street: String,
    pub city: String,
    pub region: String,
}

fn str_at(value: &toml::Value, section: &str, key: &str) -> String {
    value
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

fn float_at(value: &toml::Value, section: &str, key: &str) -> Option<f64> {
    value.get(section).and_then(|s| s.get(key)).and_then(|v| {
        v.as_float()
            .or_else(|| v.as_integer().map(|i| i as f64))
    })
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            data_dir: PathBuf::from(str_at(toml_value, "storage", "data_dir")),
            os_scheme: str_at(toml_value, "appearance", "os_scheme"),
            location: LocationConfig {
                latitude: float_at(toml_value, "location", "latitude"),
                longitude: float_at(toml_value, "location", "longitude"),
                permission_granted: toml_value
                    .get("location")
                    .and_then(|s| s.get("permission_granted"))
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false),
                name: str_at(toml_value, "location", "name"),
                street: str_at(toml_value, "location", "street"),
                city: str_at(toml_value, "location", "city"),
                region: str_at(toml_value, "location", "region"),
            },
        })
    }

    /// Configuration with every key missing.
    pub fn empty() -> Self {
        Self {
            data_dir: PathBuf::new(),
            os_scheme: String::new(),
            location: LocationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_toml_reads_all_sections() {
        let value: toml::Value = toml::from_str(
            r#"
            [storage]
            data_dir = "/tmp/gameon"

            [appearance]
            os_scheme = "dark"

            [location]
            latitude = 51.5
            longitude = -0
            permission_granted = true
            name = "Court A"
            city = "London"
            "#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&value).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/gameon"));
        assert_eq!(config.os_scheme, "dark");
        assert_eq!(config.location.latitude, Some(51.5));
        assert_eq!(config.location.longitude, Some(0.0));
        assert!(config.location.permission_granted);
        assert_eq!(config.location.name, "Court A");
        assert_eq!(config.location.street, "");
    }

    #[test]
    fn missing_sections_are_empty_facts() {
        let value: toml::Value = toml::from_str("").unwrap();
        assert_eq!(AppConfig::from_toml(&value).unwrap(), AppConfig::empty());
    }
}
