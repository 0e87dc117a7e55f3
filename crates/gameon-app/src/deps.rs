//! # Application Dependencies / 应用依赖
//!
//! Dependency grouping for [`crate::App`] construction.
//! 用于构造 App 的依赖分组。
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! **这不是 Builder 模式。**
//! - No defaults / 无默认值
//! - No hidden logic / 无隐藏逻辑

use std::sync::Arc;

use gameon_core::ports::*;

/// Every port the use cases need. All fields are required.
/// 所有依赖都是必需的。
pub struct AppDeps {
    // Identity / 身份
    pub auth: Arc<dyn AuthPort>,

    // Storage / 存储
    pub documents: Arc<dyn DocumentStorePort>,
    pub local_settings: Arc<dyn KeyValuePort>,

    // Device / 设备
    pub geolocation: Arc<dyn GeolocationPort>,
    pub appearance: Arc<dyn AppearancePort>,

    // UI / 界面
    pub navigation: Arc<dyn NavigationPort>,
    pub notices: Arc<dyn UserNoticePort>,

    // System / 系统
    pub clock: Arc<dyn ClockPort>,
}
