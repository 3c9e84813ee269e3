//! Which minutes of the day a schedule fires on, folded onto one day.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use cronscope_core::{
    format_minute_of_day, Aggregation, MinutePresenceVector, Result, ScanConfig, ScheduleError,
    TimeZoneOffset, MINUTES_PER_DAY,
};
use tracing::{debug, warn};

use crate::cursor::OccurrenceCursor;
use crate::descriptor::ScheduleDescriptor;

/// Minute-of-day presence for `expr` shifted by `offset`, using today (UTC)
/// as the reference day.
pub fn run_time_slots(
    expr: &str,
    offset: TimeZoneOffset,
    config: &ScanConfig,
) -> Aggregation<MinutePresenceVector> {
    run_time_slots_on(expr, offset, Utc::now().date_naive(), config)
}

/// Minute-of-day presence for `expr` shifted by `offset`.
///
/// Replays the `lookback_days` before `reference_day` plus the day itself,
/// so weekly (or denser) schedules show their time of day whichever weekday
/// the reference falls on. The window's first minute is excluded. Failures
/// yield an all-zero vector plus the reason.
pub fn run_time_slots_on(
    expr: &str,
    offset: TimeZoneOffset,
    reference_day: NaiveDate,
    config: &ScanConfig,
) -> Aggregation<MinutePresenceVector> {
    let result = try_run_time_slots_on(expr, offset, reference_day, config);
    if let Err(e) = &result {
        warn!(expr = %expr, %offset, error = %e, "time-slot aggregation failed");
    }
    Aggregation::from_result(result)
}

pub fn try_run_time_slots_on(
    expr: &str,
    offset: TimeZoneOffset,
    reference_day: NaiveDate,
    config: &ScanConfig,
) -> Result<MinutePresenceVector> {
    let schedule = ScheduleDescriptor::parse(expr)?;
    let (day_start, day_end) = day_bounds(reference_day, config)?;
    let start = day_start
        .checked_sub_days(Days::new(u64::from(config.lookback_days)))
        .unwrap_or(day_start);

    let mut cursor = OccurrenceCursor::after(&schedule, start, config).until(day_end);
    let mut minutes = BTreeSet::new();
    for occurrence in cursor.by_ref() {
        minutes.insert(offset.shift_minute_of_day(minute_of_day(&occurrence)));
        if minutes.len() == MINUTES_PER_DAY as usize {
            break;
        }
    }

    if cursor.is_exhausted() {
        return Err(ScheduleError::EnumerationExhausted {
            horizon_years: cursor.horizon_years(),
        });
    }

    debug!(expr = %expr, %offset, slots = minutes.len(), "time-slot aggregation complete");
    Ok(MinutePresenceVector::from_minutes(&minutes))
}

/// Distinct `HH:MM` firing times within `reference_day` itself, in order.
///
/// No lookback and no offset: only what fires on that calendar day (UTC).
pub fn run_times_in_day(
    expr: &str,
    reference_day: NaiveDate,
    config: &ScanConfig,
) -> Aggregation<Vec<String>> {
    let result = try_run_times_in_day(expr, reference_day, config);
    if let Err(e) = &result {
        warn!(expr = %expr, day = %reference_day, error = %e, "day listing failed");
    }
    Aggregation::from_result(result)
}

pub fn try_run_times_in_day(
    expr: &str,
    reference_day: NaiveDate,
    config: &ScanConfig,
) -> Result<Vec<String>> {
    let schedule = ScheduleDescriptor::parse(expr)?;
    let (day_start, day_end) = day_bounds(reference_day, config)?;

    let mut cursor = OccurrenceCursor::starting_at(&schedule, day_start, config).until(day_end);
    let times: Vec<String> = cursor
        .by_ref()
        .map(|t| format_minute_of_day(minute_of_day(&t)))
        .collect();

    if cursor.is_exhausted() {
        return Err(ScheduleError::EnumerationExhausted {
            horizon_years: cursor.horizon_years(),
        });
    }
    Ok(times)
}

fn minute_of_day(instant: &NaiveDateTime) -> u32 {
    instant.hour() * 60 + instant.minute()
}

fn day_bounds(day: NaiveDate, config: &ScanConfig) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let next = day.succ_opt().ok_or(ScheduleError::EnumerationExhausted {
        horizon_years: config.horizon_years,
    })?;
    Ok((day.and_time(NaiveTime::MIN), next.and_time(NaiveTime::MIN)))
}
