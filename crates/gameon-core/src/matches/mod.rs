//! Match listings: draft rules, stored shape and search filters.

pub mod draft;
pub mod filter;
pub mod model;

pub use draft::{round_to_nearest_half_hour, DraftError, MatchDraft, MIN_MATCH_DURATION_MINUTES};
pub use filter::{MatchFilter, TimeSlot, UnknownTimeSlot};
pub use model::{CourtType, MatchListing, MATCHES_COLLECTION};
