use std::sync::Arc;

use gameon_core::ports::DocumentStorePort;
use gameon_core::preferences::HomeSummary;
use gameon_core::UserId;
use tracing::{debug, info_span, Instrument};

use super::LoadPreferences;

/// Builds the home screen's preferences card.
///
/// Runs every time the home screen gains focus. Load failures are not
/// surfaced here; the card simply shows the defaults.
pub struct LoadHomeSummary {
    load: LoadPreferences,
}

impl LoadHomeSummary {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self {
            load: LoadPreferences::new(store),
        }
    }

    pub async fn execute(&self, user_id: Option<&UserId>) -> HomeSummary {
        let span = info_span!("usecase.load_home_summary.execute");

        async {
            let Some(user_id) = user_id else {
                return HomeSummary::not_set();
            };
            let outcome = self.load.execute(user_id).await;
            if outcome.notice.is_some() {
                debug!("home summary falls back to defaults");
            }
            HomeSummary::from_preferences(&outcome.preferences)
        }
        .instrument(span)
        .await
    }
}
