use std::sync::Arc;

use gameon_core::ports::{ClockPort, DocumentStorePort, StoreWriteError};
use gameon_core::preferences::model::USERS_COLLECTION;
use gameon_core::{PreferencesPatch, UserId};
use tracing::{info, info_span, warn, Instrument};

/// Merge-writes a preferences patch.
///
/// Only the fields set on the patch are sent, together with `updatedAt`.
/// Fields already on the stored document are left alone. There is no
/// coordination with concurrent loads; the last write wins.
pub struct SavePreferences {
    store: Arc<dyn DocumentStorePort>,
    clock: Arc<dyn ClockPort>,
}

impl SavePreferences {
    pub fn new(store: Arc<dyn DocumentStorePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        patch: &PreferencesPatch,
    ) -> Result<(), StoreWriteError> {
        let span = info_span!("usecase.save_preferences.execute", user_id = %user_id);

        async {
            let partial = patch.to_document(self.clock.now());
            info!(field_count = partial.len(), "saving preferences");

            self.store
                .merge_write_document(USERS_COLLECTION, user_id.as_str(), partial)
                .await
                .inspect_err(|err| warn!(error = %err, "failed to save preferences"))?;

            info!("preferences saved");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
