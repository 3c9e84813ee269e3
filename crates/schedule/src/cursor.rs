//! Lazy, bounded enumeration of firing instants.

use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime};
use cronscope_core::{Result, ScanConfig, ScheduleError};
use tracing::debug;

use crate::descriptor::ScheduleDescriptor;

/// Ascending iterator over the minutes a schedule fires on.
///
/// Every yielded instant is strictly later than the one before it. Each step
/// searches at most `horizon_years` past the previous match (or the seed); a
/// gap longer than that stops iteration before the window end and
/// [`is_exhausted`](OccurrenceCursor::is_exhausted) turns true.
#[derive(Debug, Clone)]
pub struct OccurrenceCursor {
    schedule: ScheduleDescriptor,
    last: NaiveDateTime,
    until: Option<NaiveDateTime>,
    horizon_years: u32,
    exhausted: bool,
    done: bool,
}

impl OccurrenceCursor {
    /// Cursor yielding instants strictly after `after`.
    pub fn after(schedule: &ScheduleDescriptor, after: NaiveDateTime, config: &ScanConfig) -> Self {
        Self {
            schedule: schedule.clone(),
            last: after,
            until: None,
            horizon_years: config.horizon_years.max(1),
            exhausted: false,
            done: false,
        }
    }

    /// Cursor yielding instants at or after `start`.
    pub fn starting_at(schedule: &ScheduleDescriptor, start: NaiveDateTime, config: &ScanConfig) -> Self {
        let seed = start
            .checked_sub_signed(chrono::Duration::minutes(1))
            .unwrap_or(start);
        Self::after(schedule, seed, config)
    }

    /// Stop before `end` (exclusive). Reaching it is normal termination.
    pub fn until(mut self, end: NaiveDateTime) -> Self {
        self.until = Some(end);
        self
    }

    /// Resume the search after `instant` when that is later than the last
    /// yielded occurrence. The next search horizon is measured from `instant`.
    pub fn skip_through(&mut self, instant: NaiveDateTime) {
        if instant > self.last {
            self.last = instant;
        }
    }

    /// Whether iteration stopped because the search horizon ran out.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }

    /// Last day the next search may look at.
    fn horizon_end(&self) -> NaiveDate {
        self.last
            .date()
            .checked_add_months(Months::new(self.horizon_years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl Iterator for OccurrenceCursor {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<NaiveDateTime> {
        if self.done {
            return None;
        }

        let horizon_end = self.horizon_end();
        let window_end = self.until.map(|u| u.date());
        let last_day = match window_end {
            Some(end) if end < horizon_end => end,
            _ => horizon_end,
        };

        match self.schedule.next_after(self.last, last_day) {
            Some(t) if self.until.is_some_and(|end| t >= end) => {
                self.done = true;
                None
            }
            Some(t) => {
                self.last = t;
                Some(t)
            }
            None => {
                self.done = true;
                // The search covered `horizon_end` through its last minute.
                let covered = horizon_end
                    .succ_opt()
                    .map_or(NaiveDateTime::MAX, |d| d.and_time(NaiveTime::MIN));
                self.exhausted = self.until.map_or(true, |end| end > covered);
                if self.exhausted {
                    debug!(
                        after = %self.last,
                        horizon_years = self.horizon_years,
                        "occurrence search hit its horizon"
                    );
                }
                None
            }
        }
    }
}

/// Up to `n` firing instants strictly after `after`.
///
/// Fails with `EnumerationExhausted` only when nothing at all was found.
pub fn next_occurrences(
    expr: &str,
    after: NaiveDateTime,
    n: usize,
    config: &ScanConfig,
) -> Result<Vec<NaiveDateTime>> {
    let schedule = ScheduleDescriptor::parse(expr)?;
    let mut cursor = OccurrenceCursor::after(&schedule, after, config);
    let found: Vec<NaiveDateTime> = cursor.by_ref().take(n).collect();
    if found.is_empty() && n > 0 && cursor.is_exhausted() {
        return Err(ScheduleError::EnumerationExhausted {
            horizon_years: cursor.horizon_years(),
        });
    }
    Ok(found)
}
