use gameon_core::ports::AppearancePort;
use gameon_core::ColorScheme;
use tokio::sync::watch;
use tracing::info;

/// OS appearance source driven by hand (config at startup, shell commands
/// afterwards).
pub struct ManualAppearance {
    scheme: watch::Sender<Option<ColorScheme>>,
}

impl ManualAppearance {
    pub fn new(initial: Option<ColorScheme>) -> Self {
        let (scheme, _) = watch::channel(initial);
        Self { scheme }
    }

    /// Parses a configured value; anything but `light`/`dark` means "unknown".
    pub fn from_config(value: &str) -> Self {
        Self::new(value.parse().ok())
    }

    /// Simulates the OS switching appearance.
    pub fn set_scheme(&self, scheme: Option<ColorScheme>) {
        info!(scheme = ?scheme, "os appearance set");
        self.scheme.send_replace(scheme);
    }
}

impl AppearancePort for ManualAppearance {
    fn current_scheme(&self) -> Option<ColorScheme> {
        *self.scheme.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Option<ColorScheme>> {
        self.scheme.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_values_parse() {
        assert_eq!(
            ManualAppearance::from_config("dark").current_scheme(),
            Some(ColorScheme::Dark)
        );
        assert_eq!(ManualAppearance::from_config("").current_scheme(), None);
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let appearance = ManualAppearance::new(None);
        let mut rx = appearance.subscribe();

        appearance.set_scheme(Some(ColorScheme::Dark));

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(ColorScheme::Dark));
    }
}
