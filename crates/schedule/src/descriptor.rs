//! [`ScheduleDescriptor`]: the parsed, queryable form of a cron expression.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use cronscope_core::{CronField, Result, ScheduleError};

use crate::expression::CronExpression;
use crate::matcher::FieldSet;

/// Longest each month can be, Feb counted as 29.
const MONTH_LENGTHS: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A schedule: one value set per field.
///
/// An instant matches when every field matches, day-of-month and day-of-week
/// included (they are intersected, not unioned).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleDescriptor {
    minutes: FieldSet,
    hours: FieldSet,
    days_of_month: FieldSet,
    months: FieldSet,
    days_of_week: FieldSet,
}

impl ScheduleDescriptor {
    /// Parse and validate expression text.
    pub fn parse(expr: &str) -> Result<Self> {
        Self::from_expression(&CronExpression::parse(expr)?)
    }

    pub fn from_expression(expr: &CronExpression) -> Result<Self> {
        let descriptor = Self {
            minutes: FieldSet::parse(CronField::Minute, expr.field(CronField::Minute))?,
            hours: FieldSet::parse(CronField::Hour, expr.field(CronField::Hour))?,
            days_of_month: FieldSet::parse(CronField::DayOfMonth, expr.field(CronField::DayOfMonth))?,
            months: FieldSet::parse(CronField::Month, expr.field(CronField::Month))?,
            days_of_week: FieldSet::parse(CronField::DayOfWeek, expr.field(CronField::DayOfWeek))?,
        };

        // `30 2` and friends can never fire.
        let reachable = descriptor.months.values().any(|m| {
            descriptor
                .days_of_month
                .first()
                .is_some_and(|d| d <= MONTH_LENGTHS[(m - 1) as usize])
        });
        if !reachable {
            return Err(ScheduleError::semantic(
                CronField::DayOfMonth,
                expr.field(CronField::DayOfMonth),
                format!(
                    "day never occurs in the selected months '{}'",
                    expr.field(CronField::Month)
                ),
            ));
        }

        Ok(descriptor)
    }

    /// Whether `instant` (seconds ignored) fires.
    pub fn matches(&self, instant: &NaiveDateTime) -> bool {
        self.matches_date(instant.date())
            && self.hours.contains(instant.hour())
            && self.minutes.contains(instant.minute())
    }

    /// Whether any minute of `date` can fire.
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.months.contains(date.month())
            && self.days_of_month.contains(date.day())
            && self.days_of_week.contains(date.weekday().num_days_from_sunday())
    }

    /// First matching minute strictly after `after`, searching no later than
    /// the end of `last_day`.
    ///
    /// Non-matching months, days and hours are skipped whole, so a sparse
    /// schedule costs at most one step per day of the searched range.
    pub(crate) fn next_after(&self, after: NaiveDateTime, last_day: NaiveDate) -> Option<NaiveDateTime> {
        let start = after
            .with_second(0)?
            .with_nanosecond(0)?
            .checked_add_signed(chrono::Duration::minutes(1))?;
        let mut date = start.date();
        let mut hour = start.hour();
        let mut minute = start.minute();

        loop {
            if date > last_day {
                return None;
            }

            if !self.months.contains(date.month()) {
                date = first_of_next_month(date)?;
                hour = 0;
                minute = 0;
                continue;
            }

            if !self.matches_date(date) {
                date = date.succ_opt()?;
                hour = 0;
                minute = 0;
                continue;
            }

            let Some(h) = self.hours.next_at_or_after(hour) else {
                date = date.succ_opt()?;
                hour = 0;
                minute = 0;
                continue;
            };
            if h != hour {
                hour = h;
                minute = 0;
            }

            match self.minutes.next_at_or_after(minute) {
                Some(m) => {
                    let time = NaiveTime::from_hms_opt(hour, m, 0)?;
                    return Some(date.and_time(time));
                }
                None => {
                    minute = 0;
                    if hour >= 23 {
                        date = date.succ_opt()?;
                        hour = 0;
                    } else {
                        hour += 1;
                    }
                }
            }
        }
    }
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}
