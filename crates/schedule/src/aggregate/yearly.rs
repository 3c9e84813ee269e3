//! Which days of a year a schedule touches.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use cronscope_core::{Aggregation, DayPresenceSet, Result, ScanConfig, ScheduleError};
use tracing::{debug, warn};

use crate::cursor::OccurrenceCursor;
use crate::descriptor::ScheduleDescriptor;
use crate::editor::normalize_time_of_day;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// Days in `year` on which `expr` fires at least once.
///
/// Meant for expressions whose minute and hour are already `0` (see
/// [`run_days_normalized`]); other expressions work but the answer is still
/// per day. Failures yield an empty set plus the reason.
pub fn run_days(expr: &str, year: i32, config: &ScanConfig) -> Aggregation<DayPresenceSet> {
    let result = try_run_days(expr, year, config);
    if let Err(e) = &result {
        warn!(expr = %expr, year, error = %e, "yearly aggregation failed");
    }
    Aggregation::from_result(result)
}

/// [`run_days`] after zeroing the minute and hour fields.
pub fn run_days_normalized(expr: &str, year: i32, config: &ScanConfig) -> Aggregation<DayPresenceSet> {
    match normalize_time_of_day(expr) {
        Ok(normalized) => run_days(&normalized, year, config),
        Err(e) => {
            warn!(expr = %expr, year, error = %e, "yearly aggregation failed");
            Aggregation::failed(e)
        }
    }
}

pub fn try_run_days(expr: &str, year: i32, config: &ScanConfig) -> Result<DayPresenceSet> {
    let out_of_range = ScheduleError::YearOutOfRange {
        year,
        min: MIN_YEAR,
        max: MAX_YEAR,
    };
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(out_of_range);
    }

    let schedule = ScheduleDescriptor::parse(expr)?;
    let start = year_start(year).ok_or_else(|| out_of_range.clone())?;
    let end = year_start(year + 1).ok_or(out_of_range)?;

    let mut cursor = OccurrenceCursor::starting_at(&schedule, start, config).until(end);
    let mut days = DayPresenceSet::new();
    while let Some(occurrence) = cursor.next() {
        if occurrence.year() != year {
            break;
        }
        let day = occurrence.date();
        days.insert(day);
        // The rest of this day cannot add anything.
        if let Some(last_minute) = day.and_hms_opt(23, 59, 0) {
            cursor.skip_through(last_minute);
        }
    }

    if cursor.is_exhausted() {
        return Err(ScheduleError::EnumerationExhausted {
            horizon_years: cursor.horizon_years(),
        });
    }

    debug!(expr = %expr, year, days = days.len(), "yearly aggregation complete");
    Ok(days)
}

fn year_start(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1).map(|d| d.and_time(NaiveTime::MIN))
}
