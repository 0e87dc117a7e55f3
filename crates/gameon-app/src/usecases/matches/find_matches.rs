use std::sync::Arc;

use anyhow::{Context, Result};
use gameon_core::matches::{MatchFilter, MatchListing, MATCHES_COLLECTION};
use gameon_core::ports::DocumentStorePort;
use gameon_core::MatchId;
use tracing::{info, info_span, warn, Instrument};

/// Lists stored matches that satisfy a search filter, earliest first.
///
/// Documents that no longer decode as a listing are skipped.
pub struct FindMatches {
    store: Arc<dyn DocumentStorePort>,
}

impl FindMatches {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, filter: &MatchFilter) -> Result<Vec<MatchListing>> {
        let span = info_span!("usecase.find_matches.execute", date = %filter.date);

        async {
            let docs = self
                .store
                .list_documents(MATCHES_COLLECTION)
                .await
                .context("failed to list matches")?;

            let mut found: Vec<MatchListing> = docs
                .into_iter()
                .filter_map(|(id, doc)| {
                    MatchListing::from_document(MatchId::from(id.as_str()), doc)
                        .inspect_err(|e| warn!(match_id = %id, error = %e, "skipping malformed match"))
                        .ok()
                })
                .filter(|listing| filter.matches(listing))
                .collect();
            found.sort_by_key(|listing| listing.start_time);

            info!(count = found.len(), "matches found");
            Ok(found)
        }
        .instrument(span)
        .await
    }
}
