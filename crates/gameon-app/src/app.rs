//! The application runtime.
//! 应用运行时。

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::deps::AppDeps;
use crate::usecases::{
    CreateMatch, FindMatches, LoadHomeSummary, PreferencesScreen, PreferencesScreenDeps,
    SessionGate, SignIn, SignOut, SignUp, ThemeResolver,
};

/// Long-lived application state plus use case factories.
///
/// The session gate and theme resolver are created once here and shared;
/// everything else is built per call from [`AppDeps`].
pub struct App {
    deps: AppDeps,
    session: Arc<SessionGate>,
    theme: Arc<ThemeResolver>,
}

/// Background tasks started by [`App::start`].
pub struct AppTasks {
    pub session_gate: JoinHandle<()>,
    pub os_appearance: JoinHandle<()>,
}

impl AppTasks {
    pub async fn join(self) {
        let _ = self.session_gate.await;
        let _ = self.os_appearance.await;
    }
}

impl App {
    /// This constructor signature IS the dependency manifest.
    /// 这个构造函数签名就是依赖清单。
    pub fn new(deps: AppDeps) -> Self {
        let session = Arc::new(SessionGate::new(deps.navigation.clone()));
        let theme = Arc::new(ThemeResolver::new(
            deps.local_settings.clone(),
            deps.appearance.current_scheme(),
        ));
        Self {
            deps,
            session,
            theme,
        }
    }

    /// Restores the theme, then follows auth events and OS appearance until
    /// `shutdown` fires.
    pub async fn start(&self, shutdown: CancellationToken) -> AppTasks {
        let theme = self.theme.init().await;
        info!(preference = %theme.preference, effective = %theme.effective, "theme ready");

        let session_gate = {
            let gate = self.session.clone();
            let subscription = self.deps.auth.subscribe();
            let shutdown = shutdown.clone();
            tokio::spawn(async move { gate.run(subscription, shutdown).await })
        };
        let os_appearance = {
            let resolver = self.theme.clone();
            let feed = self.deps.appearance.subscribe();
            tokio::spawn(async move { resolver.run_os_listener(feed, shutdown).await })
        };

        AppTasks {
            session_gate,
            os_appearance,
        }
    }

    pub fn deps(&self) -> &AppDeps {
        &self.deps
    }

    pub fn session(&self) -> &Arc<SessionGate> {
        &self.session
    }

    pub fn theme(&self) -> &Arc<ThemeResolver> {
        &self.theme
    }

    pub fn sign_in(&self) -> SignIn {
        SignIn::new(self.deps.auth.clone(), self.deps.notices.clone())
    }

    pub fn sign_up(&self) -> SignUp {
        SignUp::new(self.deps.auth.clone(), self.deps.notices.clone())
    }

    pub fn sign_out(&self) -> SignOut {
        SignOut::new(self.deps.auth.clone(), self.deps.notices.clone())
    }

    pub fn home_summary(&self) -> LoadHomeSummary {
        LoadHomeSummary::new(self.deps.documents.clone())
    }

    pub fn preferences_screen(&self) -> PreferencesScreen {
        PreferencesScreen::new(
            PreferencesScreenDeps {
                store: self.deps.documents.clone(),
                clock: self.deps.clock.clone(),
                geolocation: self.deps.geolocation.clone(),
                navigation: self.deps.navigation.clone(),
                notices: self.deps.notices.clone(),
            },
            self.session.subscribe(),
        )
    }

    pub fn create_match(&self) -> CreateMatch {
        CreateMatch::new(
            self.deps.documents.clone(),
            self.deps.clock.clone(),
            self.deps.notices.clone(),
        )
    }

    pub fn find_matches(&self) -> FindMatches {
        FindMatches::new(self.deps.documents.clone())
    }
}
