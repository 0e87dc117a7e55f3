use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{MatchId, UserId};
use crate::ports::Document;
use crate::preferences::{LocationCoords, SkillLevel};

/// Remote collection holding match listings.
pub const MATCHES_COLLECTION: &str = "matches";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtType {
    Indoor,
    #[default]
    Outdoor,
}

impl CourtType {
    pub fn as_str(self) -> &'static str {
        match self {
            CourtType::Indoor => "indoor",
            CourtType::Outdoor => "outdoor",
        }
    }
}

impl Display for CourtType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourtType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indoor" => Ok(CourtType::Indoor),
            "outdoor" => Ok(CourtType::Outdoor),
            other => Err(format!("unknown court type: {other}")),
        }
    }
}

/// A persisted match listing. Times are local wall-clock times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchListing {
    #[serde(skip)]
    pub id: Option<MatchId>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub location: String,
    pub location_coords: Option<LocationCoords>,
    pub skill_level: SkillLevel,
    pub players_needed: u8,
    pub court_type: CourtType,
    #[serde(default)]
    pub notes: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl MatchListing {
    pub fn to_document(&self) -> serde_json::Result<Document> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(serde::ser::Error::custom(
                "match listing did not serialize to an object",
            )),
        }
    }

    pub fn from_document(id: MatchId, doc: Document) -> serde_json::Result<Self> {
        let mut listing: MatchListing = serde_json::from_value(serde_json::Value::Object(doc))?;
        listing.id = Some(id);
        Ok(listing)
    }
}
