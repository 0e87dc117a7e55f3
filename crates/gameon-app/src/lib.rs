//! GameOn application layer
//!
//! Use cases and screen-level state built on top of `gameon-core` ports.

pub mod app;
pub mod app_paths;
pub mod deps;
pub mod usecases;

pub use app::{App, AppTasks};
pub use app_paths::AppPaths;
pub use deps::AppDeps;
