/// Core types used throughout the domain layer
///
/// This module defines the day identifier, habit identifier, view mode and
/// navigation direction that the range generator and analytics build on.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A local calendar date, written as `YYYY-MM-DD`
///
/// Built only from calendar fields, never from a timestamp, so there is no
/// timezone or daylight-saving drift. Ordering is chronological, which is
/// also the lexicographic order of the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayId(NaiveDate);

/// Earliest and latest years a `YYYY-MM-DD` identifier can spell
const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

impl DayId {
    /// Wrap a date, rejecting years the four-digit form cannot carry
    fn bounded(date: NaiveDate) -> Option<Self> {
        (MIN_YEAR..=MAX_YEAR).contains(&date.year()).then_some(Self(date))
    }

    /// Build a day identifier from year, month and day fields
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DomainError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(Self::bounded)
            .ok_or_else(|| DomainError::MalformedDate(format!("{:04}-{:02}-{:02}", year, month, day)))
    }

    /// The underlying calendar date
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The following calendar day
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().and_then(Self::bounded)
    }

    /// The preceding calendar day
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().and_then(Self::bounded)
    }

    /// Move by a signed number of days
    pub fn add_days(&self, days: i64) -> Option<Self> {
        let magnitude = Days::new(days.unsigned_abs());
        let moved = if days >= 0 {
            self.0.checked_add_days(magnitude)
        } else {
            self.0.checked_sub_days(magnitude)
        };
        moved.and_then(Self::bounded)
    }

    /// Move by a signed number of calendar months
    ///
    /// The day of month is clamped to the length of the target month, so
    /// January 31 plus one month is the last day of February.
    pub fn add_months(&self, months: i32) -> Option<Self> {
        let magnitude = Months::new(months.unsigned_abs());
        let moved = if months >= 0 {
            self.0.checked_add_months(magnitude)
        } else {
            self.0.checked_sub_months(magnitude)
        };
        moved.and_then(Self::bounded)
    }

    /// Calendar days from `self` to `other` (negative when `other` is earlier)
    pub fn days_until(&self, other: DayId) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// True when `self` is exactly one calendar day after `other`
    pub fn follows(&self, other: DayId) -> bool {
        other.succ() == Some(*self)
    }

    /// First day (Monday) of the ISO week containing this day
    ///
    /// `None` when that Monday falls before year 0000.
    pub fn week_start(&self) -> Option<Self> {
        let offset = self.0.weekday().num_days_from_monday();
        self.add_days(-i64::from(offset))
    }

    /// First day of the calendar month containing this day
    pub fn month_start(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Last day of the calendar month containing this day
    pub fn month_end(&self) -> Option<Self> {
        self.0
            .with_day(1)
            .and_then(|first| first.checked_add_months(Months::new(1)))
            .and_then(|next| next.pred_opt())
            .and_then(Self::bounded)
    }
}

impl From<NaiveDate> for DayId {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.0.year(), self.0.month(), self.0.day())
    }
}

impl FromStr for DayId {
    type Err = DomainError;

    /// Parse a strict `YYYY-MM-DD` string
    ///
    /// Unpadded fields, other separators and impossible dates (month 13,
    /// February 30) are all rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DomainError::MalformedDate(s.to_string());
        let bytes = s.as_bytes();

        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(malformed());
        }
        let digits_ok = bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !digits_ok {
            return Err(malformed());
        }

        let year: i32 = s[0..4].parse().map_err(|_| malformed())?;
        let month: u32 = s[5..7].parse().map_err(|_| malformed())?;
        let day: u32 = s[8..10].parse().map_err(|_| malformed())?;

        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(Self::bounded)
            .ok_or_else(malformed)
    }
}

impl TryFrom<String> for DayId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayId> for String {
    fn from(day: DayId) -> Self {
        day.to_string()
    }
}

impl JsonSchema for DayId {
    fn schema_name() -> String {
        "DayId".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        let mut schema = String::json_schema(gen).into_object();
        schema.format = Some("date".to_string());
        Schema::Object(schema)
    }
}

/// Identifier of a habit as issued by the external store
///
/// Document ids are opaque strings; the engine only compares them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct HabitId(pub String);

impl HabitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HabitId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for HabitId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Granularity of the displayed date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Monday through Sunday of the anchor's week
    Week,
    /// Every day of the anchor's calendar month
    Month,
    /// Every day of the anchor's calendar year
    Year,
    /// A fixed number of trailing days ending at the anchor
    AllTime,
    /// Explicit inclusive bounds; the anchor is ignored
    Custom { start: DayId, end: DayId },
}

impl ViewMode {
    /// Build a view mode from its name
    ///
    /// `custom` needs both bounds; the other modes ignore them.
    pub fn parse(name: &str, start: Option<DayId>, end: Option<DayId>) -> Result<Self, DomainError> {
        match name {
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            "year" => Ok(ViewMode::Year),
            "allTime" | "all_time" => Ok(ViewMode::AllTime),
            "custom" => match (start, end) {
                (Some(start), Some(end)) => Ok(ViewMode::Custom { start, end }),
                _ => Err(DomainError::InvalidViewMode(
                    "custom view requires both start and end".to_string()
                )),
            },
            other => Err(DomainError::InvalidViewMode(format!(
                "'{}' (expected week, month, year, allTime or custom)",
                other
            ))),
        }
    }

    /// The wire name of this mode
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Week => "week",
            ViewMode::Month => "month",
            ViewMode::Year => "year",
            ViewMode::AllTime => "allTime",
            ViewMode::Custom { .. } => "custom",
        }
    }
}

/// Previous/next period navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// The signed step, -1 or +1
    pub fn sign(&self) -> i32 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "previous" | "prev" | "-1" => Ok(Direction::Previous),
            "next" | "+1" | "1" => Ok(Direction::Next),
            other => Err(DomainError::InvalidDirection(other.to_string())),
        }
    }
}

impl TryFrom<i64> for Direction {
    type Error = DomainError;

    fn try_from(step: i64) -> Result<Self, Self::Error> {
        match step {
            -1 => Ok(Direction::Previous),
            1 => Ok(Direction::Next),
            other => Err(DomainError::InvalidDirection(other.to_string())),
        }
    }
}
