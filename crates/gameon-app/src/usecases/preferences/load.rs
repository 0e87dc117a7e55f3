use std::sync::Arc;

use gameon_core::ports::DocumentStorePort;
use gameon_core::preferences::model::USERS_COLLECTION;
use gameon_core::{Notice, UserId, UserPreferences};
use tracing::{info, info_span, warn, Instrument};

/// Result of a preferences load.
///
/// A load never fails: on store errors the defaults are returned together
/// with a notice the caller may surface.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub preferences: UserPreferences,
    /// Whether a stored document was found.
    pub stored: bool,
    pub notice: Option<Notice>,
}

impl LoadOutcome {
    fn defaults(notice: Option<Notice>) -> Self {
        Self {
            preferences: UserPreferences::default(),
            stored: false,
            notice,
        }
    }
}

/// Loads a user's preferences document.
///
/// ## Behavior / 行为
/// - Absent document: defaults, nothing is written
/// - Store failure: defaults plus an "Error" notice
pub struct LoadPreferences {
    store: Arc<dyn DocumentStorePort>,
}

impl LoadPreferences {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, user_id: &UserId) -> LoadOutcome {
        let span = info_span!("usecase.load_preferences.execute", user_id = %user_id);

        async {
            match self
                .store
                .get_document(USERS_COLLECTION, user_id.as_str())
                .await
            {
                Ok(Some(doc)) => {
                    info!("preferences loaded");
                    LoadOutcome {
                        preferences: UserPreferences::from_document(&doc),
                        stored: true,
                        notice: None,
                    }
                }
                Ok(None) => {
                    info!("no stored preferences, using defaults");
                    LoadOutcome::defaults(None)
                }
                Err(err) => {
                    warn!(error = %err, "failed to load preferences, using defaults");
                    LoadOutcome::defaults(Some(Notice::new(
                        "Error",
                        "Failed to load preferences",
                    )))
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::InMemoryDocumentStore;
    use gameon_core::ports::StoreReadError;
    use gameon_core::SkillLevel;
    use serde_json::json;

    #[tokio::test]
    async fn absent_document_yields_defaults_without_writing() {
        let store = Arc::new(InMemoryDocumentStore::default());
        let uc = LoadPreferences::new(store.clone());

        let outcome = uc.execute(&UserId::from("u1")).await;

        assert_eq!(outcome.preferences, UserPreferences::default());
        assert!(!outcome.stored);
        assert!(outcome.notice.is_none());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn stored_fields_are_read_and_bad_ones_defaulted() {
        let store = Arc::new(InMemoryDocumentStore::default());
        store.insert(
            USERS_COLLECTION,
            "u1",
            json!({ "skillLevel": "expert", "preferredLocation": "Riverside Park" }),
        );
        let uc = LoadPreferences::new(store);

        let outcome = uc.execute(&UserId::from("u1")).await;

        assert!(outcome.stored);
        assert_eq!(outcome.preferences.skill_level, SkillLevel::Intermediate);
        assert_eq!(outcome.preferences.preferred_location, "Riverside Park");
        assert_eq!(outcome.preferences.location_coords, None);
    }

    #[tokio::test]
    async fn read_failure_falls_back_with_notice() {
        let store = Arc::new(InMemoryDocumentStore::default());
        store.fail_reads(StoreReadError::Unavailable("offline".into()));
        let uc = LoadPreferences::new(store);

        let outcome = uc.execute(&UserId::from("u1")).await;

        assert_eq!(outcome.preferences, UserPreferences::default());
        assert_eq!(
            outcome.notice,
            Some(Notice::new("Error", "Failed to load preferences"))
        );
    }
}
