//! # gameon-core
//!
//! Core domain models and business logic for GameOn.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod app_dirs;
pub mod auth;
pub mod config;
pub mod ids;
pub mod matches;
pub mod notice;
pub mod ports;
pub mod preferences;
pub mod route;
pub mod session;
pub mod theme;

// Re-export commonly used types at the crate root
pub use auth::{AuthStateChange, AuthUser};
pub use config::AppConfig;
pub use ids::{MatchId, UserId};
pub use notice::Notice;
pub use preferences::{LocationCoords, PreferencesPatch, SkillLevel, UserPreferences};
pub use route::{Route, RouteClass};
pub use session::{SessionAction, SessionEvent, SessionState, SessionStateMachine};
pub use theme::{ColorScheme, ThemePreference, ThemeSnapshot};
