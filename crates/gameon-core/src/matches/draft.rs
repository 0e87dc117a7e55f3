//! Create-match form rules.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

use crate::ids::UserId;
use crate::preferences::{LocationCoords, SkillLevel};

use super::model::{CourtType, MatchListing};

pub const MIN_MATCH_DURATION_MINUTES: i64 = 30;
pub const MIN_PLAYERS_NEEDED: u8 = 1;
pub const MAX_PLAYERS_NEEDED: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Please select a location for the match.")]
    LocationRequired,
    #[error("Please select a future date for the match.")]
    DateInPast,
    #[error("End time must be at least 30 minutes after start time.")]
    InvalidEndTime,
}

impl DraftError {
    /// Alert title for the error.
    pub fn title(&self) -> &'static str {
        match self {
            DraftError::LocationRequired => "Location Required",
            DraftError::DateInPast => "Invalid Date",
            DraftError::InvalidEndTime => "Invalid End Time",
        }
    }
}

/// Rounds to the nearest half hour, clearing seconds.
///
/// Only the minute counts: `:15` rounds up to `:30` and `:45` rolls over
/// into the next hour.
pub fn round_to_nearest_half_hour(t: NaiveDateTime) -> NaiveDateTime {
    let minutes = i64::from(t.minute());
    let rounded = (minutes + 15) / 30 * 30;
    let hour_start = t
        .date()
        .and_hms_opt(t.hour(), 0, 0)
        .unwrap_or(t);
    hour_start + Duration::minutes(rounded)
}

/// The create-match form.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchDraft {
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub location: String,
    pub location_coords: Option<LocationCoords>,
    pub skill_level: SkillLevel,
    pub court_type: CourtType,
    pub notes: String,
    players_needed: u8,
}

impl MatchDraft {
    /// Fresh form: starts at the nearest half hour, lasts one hour.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            starts_at: round_to_nearest_half_hour(now),
            ends_at: round_to_nearest_half_hour(now + Duration::hours(1)),
            location: String::new(),
            location_coords: None,
            skill_level: SkillLevel::default(),
            court_type: CourtType::default(),
            notes: String::new(),
            players_needed: MIN_PLAYERS_NEEDED,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.starts_at.date()
    }

    pub fn players_needed(&self) -> u8 {
        self.players_needed
    }

    pub fn set_players_needed(&mut self, n: u8) {
        self.players_needed = n.clamp(MIN_PLAYERS_NEEDED, MAX_PLAYERS_NEEDED);
    }

    /// Moves the match to `date`, keeping both times of day and the duration.
    pub fn set_date(&mut self, date: NaiveDate) {
        let duration = self.ends_at - self.starts_at;
        self.starts_at = date.and_time(self.starts_at.time());
        self.ends_at = self.starts_at + duration;
    }

    /// Sets the start time on the current date. The end time is pushed out
    /// when it would fall inside the minimum duration.
    pub fn set_start_time(&mut self, time: NaiveTime) {
        self.starts_at = round_to_nearest_half_hour(self.date().and_time(time));
        let min_end = self.min_end_time();
        if self.ends_at < min_end {
            self.ends_at = min_end;
        }
    }

    /// Sets the end time on the start's date; rejected if it ends too early.
    pub fn set_end_time(&mut self, time: NaiveTime) -> Result<(), DraftError> {
        let candidate = round_to_nearest_half_hour(self.date().and_time(time));
        if candidate < self.min_end_time() {
            return Err(DraftError::InvalidEndTime);
        }
        self.ends_at = candidate;
        Ok(())
    }

    pub fn min_end_time(&self) -> NaiveDateTime {
        self.starts_at + Duration::minutes(MIN_MATCH_DURATION_MINUTES)
    }

    pub fn validate(&self, now: NaiveDateTime) -> Result<(), DraftError> {
        if self.location.trim().is_empty() {
            return Err(DraftError::LocationRequired);
        }
        if self.starts_at < now {
            return Err(DraftError::DateInPast);
        }
        if self.ends_at < self.min_end_time() {
            return Err(DraftError::InvalidEndTime);
        }
        Ok(())
    }

    pub fn into_listing(self, created_by: UserId, created_at: DateTime<Utc>) -> MatchListing {
        MatchListing {
            id: None,
            start_time: self.starts_at,
            end_time: self.ends_at,
            location: self.location,
            location_coords: self.location_coords,
            skill_level: self.skill_level,
            players_needed: self.players_needed,
            court_type: self.court_type,
            notes: self.notes,
            created_by,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn rounding_follows_minute_only() {
        assert_eq!(round_to_nearest_half_hour(at(10, 14, 59)), at(10, 0, 0));
        assert_eq!(round_to_nearest_half_hour(at(10, 15, 0)), at(10, 30, 0));
        assert_eq!(round_to_nearest_half_hour(at(10, 44, 0)), at(10, 30, 0));
        assert_eq!(round_to_nearest_half_hour(at(10, 45, 0)), at(11, 0, 0));
    }

    #[test]
    fn rounding_rolls_over_midnight() {
        let next_day = NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(round_to_nearest_half_hour(at(23, 50, 0)), next_day);
    }

    #[test]
    fn new_draft_lasts_one_hour() {
        let draft = MatchDraft::new(at(9, 10, 0));
        assert_eq!(draft.starts_at, at(9, 0, 0));
        assert_eq!(draft.ends_at, at(10, 0, 0));
        assert_eq!(draft.players_needed(), 1);
        assert_eq!(draft.court_type, CourtType::Outdoor);
    }

    #[test]
    fn later_start_pushes_end() {
        let mut draft = MatchDraft::new(at(9, 0, 0));
        draft.set_start_time(time(11, 20));
        assert_eq!(draft.starts_at, at(11, 30, 0));
        assert_eq!(draft.ends_at, at(12, 0, 0));
    }

    #[test]
    fn earlier_start_keeps_end() {
        let mut draft = MatchDraft::new(at(9, 0, 0));
        draft.set_start_time(time(8, 0));
        assert_eq!(draft.ends_at, at(10, 0, 0));
    }

    #[test]
    fn end_inside_minimum_duration_is_rejected() {
        let mut draft = MatchDraft::new(at(9, 0, 0));
        assert_eq!(draft.set_end_time(time(9, 10)), Err(DraftError::InvalidEndTime));
        assert_eq!(draft.ends_at, at(10, 0, 0));

        draft.set_end_time(time(9, 30)).unwrap();
        assert_eq!(draft.ends_at, at(9, 30, 0));
    }

    #[test]
    fn players_needed_is_clamped() {
        let mut draft = MatchDraft::new(at(9, 0, 0));
        draft.set_players_needed(0);
        assert_eq!(draft.players_needed(), 1);
        draft.set_players_needed(9);
        assert_eq!(draft.players_needed(), 4);
    }

    #[test]
    fn validation_order() {
        let mut draft = MatchDraft::new(at(9, 0, 0));
        assert_eq!(draft.validate(at(8, 0, 0)), Err(DraftError::LocationRequired));

        draft.location = "Court A".into();
        assert_eq!(draft.validate(at(9, 30, 0)), Err(DraftError::DateInPast));
        assert_eq!(draft.validate(at(8, 0, 0)), Ok(()));
    }

    #[test]
    fn set_date_keeps_times() {
        let mut draft = MatchDraft::new(at(9, 0, 0));
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        draft.set_date(date);
        assert_eq!(draft.starts_at, date.and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(draft.ends_at, date.and_hms_opt(10, 0, 0).unwrap());
    }
}
