//! Device-facing adapters. Each one stands in for a mobile platform service
//! so the core runs headless.

pub mod adapters;
pub mod app_dirs;

pub use adapters::{ConfiguredGeolocation, ConsoleNotices, ManualAppearance, StackNavigator};
pub use app_dirs::DirsAppDirsAdapter;
