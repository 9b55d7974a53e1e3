/// Date-range generation and period navigation
///
/// Ranges are derived from a view mode and an anchor day using calendar
/// arithmetic on (year, month, day) only.

use std::ops::Deref;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::domain::{DayId, Direction, DomainError, ViewMode};

/// An ascending, gap-free, non-empty run of days
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DateRange {
    days: Vec<DayId>,
}

impl DateRange {
    /// Every day from `start` to `end` inclusive
    pub fn between(start: DayId, end: DayId) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let capacity = usize::try_from(start.days_until(end) + 1).unwrap_or(0);
        let mut days = Vec::with_capacity(capacity);
        let mut current = start;
        loop {
            days.push(current);
            if current == end {
                break;
            }
            current = current
                .succ()
                .ok_or_else(|| DomainError::DateOutOfRange(current.to_string()))?;
        }

        Ok(Self { days })
    }

    /// `len` days ending at `end` inclusive
    fn trailing(end: DayId, len: u32) -> Result<Self, DomainError> {
        let back = i64::from(len.max(1)) - 1;
        let start = end
            .add_days(-back)
            .ok_or_else(|| DomainError::DateOutOfRange(end.to_string()))?;
        Self::between(start, end)
    }

    pub fn start(&self) -> DayId {
        self.days[0]
    }

    pub fn end(&self) -> DayId {
        self.days[self.days.len() - 1]
    }

    pub fn days(&self) -> &[DayId] {
        &self.days
    }

    /// Membership check using the contiguity invariant
    pub fn contains(&self, day: DayId) -> bool {
        self.start() <= day && day <= self.end()
    }

    /// The same-length range that ends the day before this one starts
    pub fn preceding(&self) -> Result<Self, DomainError> {
        let end = self
            .start()
            .pred()
            .ok_or_else(|| DomainError::DateOutOfRange(self.start().to_string()))?;
        Self::trailing(end, self.days.len() as u32)
    }
}

impl Deref for DateRange {
    type Target = [DayId];

    fn deref(&self) -> &Self::Target {
        &self.days
    }
}

/// Produce the ordered date range for a view
///
/// - `Week`: Monday to Sunday of the anchor's ISO week.
/// - `Month`: day 1 to the last day of the anchor's month.
/// - `Year`: January 1 to December 31 of the anchor's year.
/// - `AllTime`: `config.all_time_days` days ending at the anchor.
/// - `Custom`: the explicit bounds; the anchor is ignored.
pub fn range_for(mode: ViewMode, anchor: DayId, config: &EngineConfig) -> Result<DateRange, DomainError> {
    let out_of_range = || DomainError::DateOutOfRange(anchor.to_string());

    match mode {
        ViewMode::Week => {
            let start = anchor.week_start().ok_or_else(out_of_range)?;
            let end = start.add_days(6).ok_or_else(out_of_range)?;
            DateRange::between(start, end)
        }
        ViewMode::Month => {
            let start = anchor.month_start();
            let end = anchor.month_end().ok_or_else(out_of_range)?;
            DateRange::between(start, end)
        }
        ViewMode::Year => {
            let start = DayId::from_ymd(anchor.year(), 1, 1)?;
            let end = DayId::from_ymd(anchor.year(), 12, 31)?;
            DateRange::between(start, end)
        }
        ViewMode::AllTime => DateRange::trailing(anchor, config.all_time_days),
        ViewMode::Custom { start, end } => DateRange::between(start, end),
    }
}

/// Move an anchor by one whole unit of the view
///
/// Month and year steps clamp the day of month, so the result always lands
/// in the neighbouring unit. A custom view moves by its own length in days.
pub fn shift(
    mode: ViewMode,
    anchor: DayId,
    direction: Direction,
    config: &EngineConfig,
) -> Result<DayId, DomainError> {
    let sign = direction.sign();
    let moved = match mode {
        ViewMode::Week => anchor.add_days(7 * i64::from(sign)),
        ViewMode::Month => anchor.add_months(sign),
        ViewMode::Year => anchor.add_months(12 * sign),
        ViewMode::AllTime => anchor.add_days(i64::from(config.all_time_days) * i64::from(sign)),
        ViewMode::Custom { start, end } => {
            let span = start.days_until(end) + 1;
            if span <= 0 {
                return Err(DomainError::InvalidRange {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
            anchor.add_days(span * i64::from(sign))
        }
    };
    moved.ok_or_else(|| DomainError::DateOutOfRange(anchor.to_string()))
}

/// Shift a whole view, moving custom bounds along with the anchor
pub fn shift_view(
    mode: ViewMode,
    anchor: DayId,
    direction: Direction,
    config: &EngineConfig,
) -> Result<(ViewMode, DayId), DomainError> {
    let next_anchor = shift(mode, anchor, direction, config)?;
    let next_mode = match mode {
        ViewMode::Custom { start, end } => {
            let new_start = shift(mode, start, direction, config)?;
            let new_end = shift(mode, end, direction, config)?;
            ViewMode::Custom { start: new_start, end: new_end }
        }
        other => other,
    };
    Ok((next_mode, next_anchor))
}

/// Title for the period a view shows
pub fn period_label(mode: ViewMode, anchor: DayId, config: &EngineConfig) -> String {
    match mode {
        ViewMode::Week => format!("Week of {}", anchor.week_start().unwrap_or(anchor)),
        ViewMode::Month => anchor.date().format("%B %Y").to_string(),
        ViewMode::Year => anchor.year().to_string(),
        ViewMode::AllTime => format!("Last {} days", config.all_time_days),
        ViewMode::Custom { start, end } => format!("{} to {}", start, end),
    }
}
