use std::sync::Arc;

use gameon_core::matches::{DraftError, MatchDraft, MatchListing, MATCHES_COLLECTION};
use gameon_core::ports::{ClockPort, DocumentStorePort, StoreWriteError, UserNoticePort};
use gameon_core::{MatchId, Notice, UserId};
use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateMatchError {
    #[error(transparent)]
    Invalid(#[from] DraftError),

    #[error("failed to store match: {0}")]
    Store(#[from] StoreWriteError),

    #[error("failed to encode match: {0}")]
    Encode(String),
}

/// Validates a create-match form and stores it as a new listing.
///
/// ## Behavior / 行为
/// - Validation failures raise the matching alert and write nothing
/// - The listing gets a fresh id and is written to the `matches` collection
pub struct CreateMatch {
    store: Arc<dyn DocumentStorePort>,
    clock: Arc<dyn ClockPort>,
    notices: Arc<dyn UserNoticePort>,
}

impl CreateMatch {
    pub fn new(
        store: Arc<dyn DocumentStorePort>,
        clock: Arc<dyn ClockPort>,
        notices: Arc<dyn UserNoticePort>,
    ) -> Self {
        Self {
            store,
            clock,
            notices,
        }
    }

    pub async fn execute(
        &self,
        created_by: &UserId,
        draft: MatchDraft,
    ) -> Result<MatchListing, CreateMatchError> {
        let span = info_span!("usecase.create_match.execute", user_id = %created_by);

        async {
            if let Err(err) = draft.validate(self.clock.now_local()) {
                info!(reason = %err, "match draft rejected");
                self.notices.alert(Notice::new(err.title(), err.to_string()));
                return Err(err.into());
            }

            let id = MatchId::generate();
            let mut listing = draft.into_listing(created_by.clone(), self.clock.now());
            let doc = listing
                .to_document()
                .map_err(|e| CreateMatchError::Encode(e.to_string()))?;

            if let Err(err) = self
                .store
                .merge_write_document(MATCHES_COLLECTION, id.as_str(), doc)
                .await
            {
                warn!(error = %err, "failed to store match");
                self.notices
                    .alert(Notice::new("Error", "Failed to create match"));
                return Err(err.into());
            }

            info!(match_id = %id, start = %listing.start_time, "match created");
            listing.id = Some(id);
            Ok(listing)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{FixedClock, InMemoryDocumentStore, RecordingNotices};
    use chrono::{Duration, NaiveTime};
    use serde_json::json;

    fn setup() -> (Arc<InMemoryDocumentStore>, Arc<FixedClock>, Arc<RecordingNotices>, CreateMatch) {
        let store = Arc::new(InMemoryDocumentStore::default());
        let clock = Arc::new(FixedClock::at("2025-06-14T09:10:00Z"));
        let notices = Arc::new(RecordingNotices::default());
        let uc = CreateMatch::new(store.clone(), clock.clone(), notices.clone());
        (store, clock, notices, uc)
    }

    #[tokio::test]
    async fn valid_draft_is_stored() {
        let (store, clock, notices, uc) = setup();
        let mut draft = MatchDraft::new(clock.now_local());
        draft.set_date(draft.date() + Duration::days(1));
        draft.location = "Riverside Courts".into();
        draft.set_players_needed(3);

        let listing = uc.execute(&UserId::from("u1"), draft).await.unwrap();

        let id = listing.id.clone().unwrap();
        let doc = store.get(MATCHES_COLLECTION, id.as_str()).unwrap();
        assert_eq!(doc["location"], json!("Riverside Courts"));
        assert_eq!(doc["playersNeeded"], json!(3));
        assert_eq!(doc["createdBy"], json!("u1"));
        assert!(notices.all().is_empty());
    }

    #[tokio::test]
    async fn missing_location_alerts_and_writes_nothing() {
        let (store, clock, notices, uc) = setup();
        let draft = MatchDraft::new(clock.now_local() + Duration::days(1));

        let err = uc.execute(&UserId::from("u1"), draft).await.unwrap_err();

        assert_eq!(err, CreateMatchError::Invalid(DraftError::LocationRequired));
        assert_eq!(
            notices.all(),
            vec![Notice::new(
                "Location Required",
                "Please select a location for the match."
            )]
        );
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn past_start_is_rejected() {
        let (_store, clock, notices, uc) = setup();
        let mut draft = MatchDraft::new(clock.now_local());
        draft.location = "Court A".into();
        draft.set_start_time(NaiveTime::from_hms_opt(7, 0, 0).unwrap());

        let err = uc.execute(&UserId::from("u1"), draft).await.unwrap_err();

        assert_eq!(err, CreateMatchError::Invalid(DraftError::DateInPast));
        assert_eq!(notices.titles(), vec!["Invalid Date"]);
    }

    #[tokio::test]
    async fn store_failure_alerts() {
        let (store, clock, notices, uc) = setup();
        store.fail_writes(StoreWriteError::Unavailable("offline".into()));
        let mut draft = MatchDraft::new(clock.now_local() + Duration::days(1));
        draft.location = "Court A".into();

        let err = uc.execute(&UserId::from("u1"), draft.clone()).await.unwrap_err();
        assert!(matches!(err, CreateMatchError::Store(_)));
        assert_eq!(notices.titles(), vec!["Error"]);

        store.heal();
        assert!(uc.execute(&UserId::from("u1"), draft).await.is_ok());
    }
}
