//! Date range for filtering events, and parsing of typed-in timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{EventBoardError, EventBoardResult};
use crate::query::FilterCriteria;

/// Formats accepted for timestamps without an offset.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Date range for filtering events.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Parse YYYY-MM-DD bounds in `tz`.
    /// - `from`: start of that day
    /// - `to`: end of that day (23:59:59)
    pub fn from_args(from: Option<&str>, to: Option<&str>, tz: Tz) -> EventBoardResult<Self> {
        let from = from
            .map(|s| parse_day(s, "from").and_then(|d| localize(d.and_time(NaiveTime::MIN), tz)))
            .transpose()?;

        let to = to
            .map(|s| parse_day(s, "to").and_then(|d| localize(end_of_day(d), tz)))
            .transpose()?;

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(EventBoardError::invalid_field(
                    "date range",
                    "'from' must not be after 'to'",
                ));
            }
        }

        Ok(DateRange { from, to })
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Copy the bounds into `criteria`.
    pub fn apply(&self, criteria: &mut FilterCriteria) {
        criteria.start_date = self.from;
        criteria.end_date = self.to;
    }
}

/// Parse a timestamp typed by a user. RFC 3339 input keeps its offset;
/// anything without an offset is read as wall-clock time in `tz`.
pub fn parse_datetime(input: &str, tz: Tz) -> EventBoardResult<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| {
            EventBoardError::invalid_field(
                "date/time",
                format!("'{}'. Expected YYYY-MM-DDTHH:MM", input),
            )
        })
        .and_then(|naive| localize(naive, tz))
}

/// Convert wall-clock time in `tz` to UTC. Ambiguous times (clocks going
/// back) resolve to the earlier instant; skipped times are an error.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> EventBoardResult<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            EventBoardError::invalid_field(
                "date/time",
                format!("{} does not exist in {}", naive, tz.name()),
            )
        })
}

fn parse_day(s: &str, field: &'static str) -> EventBoardResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        EventBoardError::invalid_field(field, format!("'{}'. Expected YYYY-MM-DD", s))
    })
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
}
