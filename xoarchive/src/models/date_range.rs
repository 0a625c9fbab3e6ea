//! Date ranges requested from the archive and the half-year filter periods.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ApodError, ApodResult};

/// First day published in the APOD archive.
pub const APOD_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1995, 6, 16) {
    Some(d) => d,
    None => panic!("invalid APOD epoch"),
};

/// Months covered by one filter period.
const FILTER_SPAN_MONTHS: u32 = 6;

/// Inclusive date range sent upstream as `start_date` / `end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> ApodResult<Self> {
        if start > end {
            return Err(ApodError::invalid_range(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Compute the range fetched for a filter selection.
    ///
    /// Without a start date the range runs from January 1 of the current year
    /// to `today`. With one, it spans six months from the start, clamped to
    /// `today`. Starts before the archive epoch are moved up to the epoch.
    pub fn for_filter(start: Option<NaiveDate>, today: NaiveDate) -> ApodResult<Self> {
        let (start, end) = match start {
            None => {
                let jan_first =
                    NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                (jan_first, today)
            }
            Some(start) => {
                if start > today {
                    return Err(ApodError::invalid_range(format!(
                        "start date {} is in the future",
                        start
                    )));
                }
                let end = start
                    .checked_add_months(Months::new(FILTER_SPAN_MONTHS))
                    .map_or(today, |end| end.min(today));
                (start, end)
            }
        };

        let start = start.max(APOD_EPOCH);
        Self::new(start, end.max(start))
    }

    /// Number of days covered, inclusive of both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Half of a calendar year, the granularity of the date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfYear {
    First,
    Second,
}

impl HalfYear {
    pub const ALL: [HalfYear; 2] = [HalfYear::First, HalfYear::Second];

    pub fn start_month(&self) -> u32 {
        match self {
            HalfYear::First => 1,
            HalfYear::Second => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HalfYear::First => "Jan–Jun",
            HalfYear::Second => "Jul–Dec",
        }
    }

    /// First day of this half in `year`.
    pub fn start_date(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.start_month(), 1)
    }

    /// The half a date falls in.
    pub fn containing(date: NaiveDate) -> Self {
        if date.month() < 7 {
            HalfYear::First
        } else {
            HalfYear::Second
        }
    }
}
