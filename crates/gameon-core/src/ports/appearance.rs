use tokio::sync::watch;

use crate::theme::ColorScheme;

/// Live operating-system appearance.
///
/// `None` means the OS does not report a scheme.
pub trait AppearancePort: Send + Sync {
    fn current_scheme(&self) -> Option<ColorScheme>;

    /// Receiver that observes every OS scheme change.
    fn subscribe(&self) -> watch::Receiver<Option<ColorScheme>>;
}
