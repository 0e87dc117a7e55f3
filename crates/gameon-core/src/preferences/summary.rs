//! Home screen preference summary.

use super::model::UserPreferences;

pub const NOT_SET: &str = "Not Set";

/// What the home screen's "Your Preferences" card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeSummary {
    pub skill_level: String,
    pub preferred_location: String,
}

impl HomeSummary {
    pub fn from_preferences(prefs: &UserPreferences) -> Self {
        let location = if prefs.preferred_location.is_empty() {
            NOT_SET.to_string()
        } else {
            prefs.preferred_location.clone()
        };

        Self {
            skill_level: prefs.skill_level.label().to_string(),
            preferred_location: location,
        }
    }

    /// Shown while signed out.
    pub fn not_set() -> Self {
        Self {
            skill_level: NOT_SET.to_string(),
            preferred_location: NOT_SET.to_string(),
        }
    }
}
