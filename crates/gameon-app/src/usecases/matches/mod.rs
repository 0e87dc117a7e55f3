//! Match listing use cases.

mod create_match;
mod find_matches;

pub use create_match::{CreateMatch, CreateMatchError};
pub use find_matches::FindMatches;
