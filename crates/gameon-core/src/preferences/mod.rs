//! User preference domain: skill level, preferred location, coordinates.

pub mod location;
pub mod model;
pub mod summary;

pub use location::ReverseGeocodedAddress;
pub use model::{
    LocationCoords, PreferencesPatch, SkillLevel, UnknownSkillLevel, UserPreferences,
    USERS_COLLECTION,
};
pub use summary::HomeSummary;
