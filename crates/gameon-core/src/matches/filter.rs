//! Find-matches filters.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::preferences::SkillLevel;

use super::model::MatchListing;

/// Part of the day a match starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeSlot {
    /// 05:00 - 11:59
    Morning,
    /// 12:00 - 16:59
    Afternoon,
    /// 17:00 - 20:59
    Evening,
    /// 21:00 - 04:59
    LateNight,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
        TimeSlot::LateNight,
    ];

    pub fn of(time: NaiveTime) -> TimeSlot {
        match time.hour() {
            5..=11 => TimeSlot::Morning,
            12..=16 => TimeSlot::Afternoon,
            17..=20 => TimeSlot::Evening,
            _ => TimeSlot::LateNight,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
            TimeSlot::LateNight => "late night",
        }
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time slot: {0}")]
pub struct UnknownTimeSlot(pub String);

impl FromStr for TimeSlot {
    type Err = UnknownTimeSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], " ").as_str() {
            "morning" => Ok(TimeSlot::Morning),
            "afternoon" => Ok(TimeSlot::Afternoon),
            "evening" => Ok(TimeSlot::Evening),
            "late night" => Ok(TimeSlot::LateNight),
            _ => Err(UnknownTimeSlot(s.to_string())),
        }
    }
}

/// Search criteria; `None` means "any".
#[derive(Debug, Clone, PartialEq)]
pub struct MatchFilter {
    pub date: NaiveDate,
    pub location: Option<String>,
    pub skill_level: Option<SkillLevel>,
    pub time_slot: Option<TimeSlot>,
}

impl MatchFilter {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            location: None,
            skill_level: None,
            time_slot: None,
        }
    }

    pub fn matches(&self, listing: &MatchListing) -> bool {
        if listing.start_time.date() != self.date {
            return false;
        }
        if let Some(level) = self.skill_level {
            if listing.skill_level != level {
                return false;
            }
        }
        if let Some(slot) = self.time_slot {
            if TimeSlot::of(listing.start_time.time()) != slot {
                return false;
            }
        }
        match self.location.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => listing
                .location
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }

    /// One line per criterion, "Any" for unset ones.
    pub fn describe(&self) -> String {
        let location = self
            .location
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or("Any");
        let skill = self.skill_level.map(|s| s.as_str()).unwrap_or("Any");
        let slot = self.time_slot.map(|s| s.as_str()).unwrap_or("Any");
        format!(
            "Location: {location}\nSkill Level: {skill}\nDate: {}\nTime: {slot}",
            self.date.format("%a %b %d %Y")
        )
    }
}
