//! Preference store adapter use cases.
//! 偏好存储用例。

mod home;
mod load;
mod locate;
mod save;
mod screen;

pub use home::LoadHomeSummary;
pub use load::{LoadOutcome, LoadPreferences};
pub use locate::{ResolveCurrentLocation, ResolvedLocation};
pub use save::SavePreferences;
pub use screen::{PreferencesScreen, PreferencesScreenDeps, PreferencesView};
