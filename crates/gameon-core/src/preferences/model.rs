use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ports::Document;

/// Remote collection holding one preferences document per user.
pub const USERS_COLLECTION: &str = "users";

pub(crate) const FIELD_SKILL_LEVEL: &str = "skillLevel";
pub(crate) const FIELD_PREFERRED_LOCATION: &str = "preferredLocation";
pub(crate) const FIELD_LOCATION_COORDS: &str = "locationCoords";
pub(crate) const FIELD_UPDATED_AT: &str = "updatedAt";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 3] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }

    /// Capitalized form shown on screens.
    pub fn label(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

impl Display for SkillLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown skill level: {0}")]
pub struct UnknownSkillLevel(pub String);

impl FromStr for SkillLevel {
    type Err = UnknownSkillLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            _ => Err(UnknownSkillLevel(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationCoords {
    pub latitude: f64,
    pub longitude: f64,
}

/// Preferences as the screens see them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub skill_level: SkillLevel,
    pub preferred_location: String,
    pub location_coords: Option<LocationCoords>,
}

impl UserPreferences {
    /// Reads a stored document field by field.
    ///
    /// Missing or malformed fields fall back to their defaults so one bad
    /// value never discards the rest of the record.
    pub fn from_document(doc: &Document) -> Self {
        let defaults = Self::default();

        let skill_level = doc
            .get(FIELD_SKILL_LEVEL)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.skill_level);

        let preferred_location = doc
            .get(FIELD_PREFERRED_LOCATION)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(defaults.preferred_location);

        let location_coords = doc
            .get(FIELD_LOCATION_COORDS)
            .filter(|v| !v.is_null())
            .and_then(|v| serde_json::from_value(v.clone()).ok());

        Self {
            skill_level,
            preferred_location,
            location_coords,
        }
    }

    pub fn apply(&mut self, patch: &PreferencesPatch) {
        if let Some(level) = patch.skill_level {
            self.skill_level = level;
        }
        if let Some(location) = &patch.preferred_location {
            self.preferred_location = location.clone();
        }
        if let Some(coords) = patch.location_coords {
            self.location_coords = coords;
        }
    }
}

/// Partial update for a preferences document.
///
/// Only `Some` fields are written; everything else on the stored record survives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreferencesPatch {
    pub skill_level: Option<SkillLevel>,
    pub preferred_location: Option<String>,
    /// `Some(None)` clears the stored coordinates.
    pub location_coords: Option<Option<LocationCoords>>,
}

impl PreferencesPatch {
    /// Patch carrying every field of a full preferences form.
    pub fn from_preferences(prefs: &UserPreferences) -> Self {
        Self {
            skill_level: Some(prefs.skill_level),
            preferred_location: Some(prefs.preferred_location.clone()),
            location_coords: Some(prefs.location_coords),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.skill_level.is_none()
            && self.preferred_location.is_none()
            && self.location_coords.is_none()
    }

    /// Document fragment for a merge-write, stamped with `updated_at`.
    pub fn to_document(&self, updated_at: DateTime<Utc>) -> Document {
        let mut doc = Document::new();
        if let Some(level) = self.skill_level {
            doc.insert(FIELD_SKILL_LEVEL.into(), Value::from(level.as_str()));
        }
        if let Some(location) = &self.preferred_location {
            doc.insert(FIELD_PREFERRED_LOCATION.into(), Value::from(location.as_str()));
        }
        if let Some(coords) = self.location_coords {
            let value = match coords {
                Some(coords) => serde_json::json!({
                    "latitude": coords.latitude,
                    "longitude": coords.longitude,
                }),
                None => Value::Null,
            };
            doc.insert(FIELD_LOCATION_COORDS.into(), value);
        }
        doc.insert(
            FIELD_UPDATED_AT.into(),
            Value::from(updated_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        doc
    }
}
