pub mod auth;
pub mod matches;
pub mod preferences;
pub mod session;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{RegistrationError, SignIn, SignOut, SignUp};
pub use matches::{CreateMatch, CreateMatchError, FindMatches};
pub use preferences::{
    LoadHomeSummary, LoadOutcome, LoadPreferences, PreferencesScreen, PreferencesScreenDeps,
    PreferencesView, ResolveCurrentLocation, ResolvedLocation, SavePreferences,
};
pub use session::SessionGate;
pub use theme::ThemeResolver;
