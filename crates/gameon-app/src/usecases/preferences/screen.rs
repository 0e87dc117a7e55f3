//! Preferences screen state.
//! 偏好设置页面状态。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gameon_core::ports::{
    ClockPort, DocumentStorePort, GeolocationPort, LocationError, NavigationPort, UserNoticePort,
};
use gameon_core::{
    LocationCoords, Notice, PreferencesPatch, Route, SessionState, SkillLevel, UserId,
    UserPreferences,
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, Instrument};

use super::{LoadPreferences, ResolveCurrentLocation, SavePreferences};

/// What the preferences form currently shows.
///
/// `committed` is the last state known to be stored remotely; `draft` holds
/// the user's unsaved edits.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesView {
    pub committed: UserPreferences,
    pub draft: UserPreferences,
    pub is_loading: bool,
    pub is_locating: bool,
    pub is_saving: bool,
}

impl Default for PreferencesView {
    fn default() -> Self {
        Self {
            committed: UserPreferences::default(),
            draft: UserPreferences::default(),
            is_loading: true,
            is_locating: false,
            is_saving: false,
        }
    }
}

impl PreferencesView {
    pub fn has_unsaved_changes(&self) -> bool {
        self.committed != self.draft
    }
}

/// Everything the preferences screen needs from the outside.
pub struct PreferencesScreenDeps {
    pub store: Arc<dyn DocumentStorePort>,
    pub clock: Arc<dyn ClockPort>,
    pub geolocation: Arc<dyn GeolocationPort>,
    pub navigation: Arc<dyn NavigationPort>,
    pub notices: Arc<dyn UserNoticePort>,
}

/// A mounted preferences screen.
///
/// Async results are applied only while the screen scope is alive; after
/// [`PreferencesScreen::unmount`] they are dropped without touching the view
/// or raising alerts.
pub struct PreferencesScreen {
    load: LoadPreferences,
    save: SavePreferences,
    locate: ResolveCurrentLocation,
    navigation: Arc<dyn NavigationPort>,
    notices: Arc<dyn UserNoticePort>,
    session: watch::Receiver<SessionState>,
    view: Mutex<PreferencesView>,
    scope: CancellationToken,
}

impl PreferencesScreen {
    pub fn new(deps: PreferencesScreenDeps, session: watch::Receiver<SessionState>) -> Self {
        Self {
            load: LoadPreferences::new(deps.store.clone()),
            save: SavePreferences::new(deps.store, deps.clock),
            locate: ResolveCurrentLocation::new(deps.geolocation),
            navigation: deps.navigation,
            notices: deps.notices,
            session,
            view: Mutex::new(PreferencesView::default()),
            scope: CancellationToken::new(),
        }
    }

    pub fn view(&self) -> PreferencesView {
        self.lock_view().clone()
    }

    pub fn is_mounted(&self) -> bool {
        !self.scope.is_cancelled()
    }

    /// Tears down the screen scope.
    pub fn unmount(&self) {
        debug!("preferences screen unmounted");
        self.scope.cancel();
    }

    /// Loads the stored preferences into both committed and draft state.
    ///
    /// Without a signed-in user the screen sends the navigation host to the
    /// login route instead.
    pub async fn mount(&self) {
        let span = info_span!("screen.preferences.mount");

        async {
            let Some(user_id) = self.user_id() else {
                info!("no signed-in user, leaving preferences");
                self.navigation.replace(Route::Login);
                return;
            };

            let outcome = self.load.execute(&user_id).await;
            if !self.is_mounted() {
                debug!("load finished after unmount, dropped");
                return;
            }

            {
                let mut view = self.lock_view();
                view.committed = outcome.preferences.clone();
                view.draft = outcome.preferences;
                view.is_loading = false;
            }
            if let Some(notice) = outcome.notice {
                self.notices.alert(notice);
            }
        }
        .instrument(span)
        .await
    }

    pub fn select_skill_level(&self, level: SkillLevel) {
        self.lock_view().draft.skill_level = level;
    }

    /// A place picked from the autocomplete list.
    pub fn select_place(&self, label: impl Into<String>, coords: Option<LocationCoords>) {
        let mut view = self.lock_view();
        view.draft.preferred_location = label.into();
        view.draft.location_coords = coords;
    }

    /// Fills the location from the device position.
    ///
    /// A position without a reverse-geocoded label keeps the previous text.
    pub async fn use_current_location(&self) {
        let span = info_span!("screen.preferences.use_current_location");

        async {
            self.lock_view().is_locating = true;
            let result = self.locate.execute().await;
            if !self.is_mounted() {
                debug!("location resolved after unmount, dropped");
                return;
            }

            let notice = {
                let mut view = self.lock_view();
                view.is_locating = false;
                match result {
                    Ok(resolved) => {
                        view.draft.location_coords = Some(resolved.coords);
                        if !resolved.label.is_empty() {
                            view.draft.preferred_location = resolved.label;
                        }
                        None
                    }
                    Err(LocationError::PermissionDenied) => Some(Notice::new(
                        "Permission Denied",
                        "Please enable location services to find tennis courts near you.",
                    )),
                    Err(LocationError::Unavailable(_)) => Some(Notice::new(
                        "Location Error",
                        "Could not get your current location. Please try again.",
                    )),
                }
            };
            if let Some(notice) = notice {
                self.notices.alert(notice);
            }
        }
        .instrument(span)
        .await
    }

    /// Writes the draft and commits it once the store accepted it.
    ///
    /// Returns whether the save succeeded. On success the screen navigates
    /// back; on failure the committed state is untouched.
    pub async fn save(&self) -> bool {
        let span = info_span!("screen.preferences.save");

        async {
            let Some(user_id) = self.user_id() else {
                self.navigation.replace(Route::Login);
                return false;
            };

            let draft = {
                let mut view = self.lock_view();
                view.is_saving = true;
                view.draft.clone()
            };

            let result = self
                .save
                .execute(&user_id, &PreferencesPatch::from_preferences(&draft))
                .await;
            if !self.is_mounted() {
                debug!("save finished after unmount, dropped");
                return result.is_ok();
            }

            let saved = {
                let mut view = self.lock_view();
                view.is_saving = false;
                if result.is_ok() {
                    view.committed = draft;
                }
                result.is_ok()
            };

            if saved {
                self.notices
                    .alert(Notice::new("Success", "Preferences saved successfully"));
                self.navigation.back();
            } else {
                self.notices
                    .alert(Notice::new("Error", "Failed to save preferences"));
            }
            saved
        }
        .instrument(span)
        .await
    }

    fn user_id(&self) -> Option<UserId> {
        self.session.borrow().user_id().cloned()
    }

    fn lock_view(&self) -> MutexGuard<'_, PreferencesView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
