//! Field-level rewriting of expression text.

use cronscope_core::{CronField, Result, ScheduleError};

use crate::expression::CronExpression;

/// Replace field `index` (0 = minute … 4 = day-of-week) of `expr` with `value`.
///
/// Returns a new expression string; `expr` is untouched. Fails with
/// `Structural` unless `expr` has exactly 5 fields, then with `FieldIndex` for
/// an index outside 0-4.
pub fn modify_field(expr: &str, index: usize, value: &str) -> Result<String> {
    let expression = CronExpression::parse(expr)?;
    let field = CronField::from_index(index).ok_or(ScheduleError::FieldIndex { index })?;
    Ok(expression.with_field(field, value)?.to_string())
}

/// Zero the minute and hour fields, leaving the day-level fields alone.
///
/// The yearly aggregator only cares which days fire, so every schedule is
/// reduced to one firing at midnight on each of its days.
pub fn normalize_time_of_day(expr: &str) -> Result<String> {
    let minute_zeroed = modify_field(expr, CronField::Minute.index(), "0")?;
    modify_field(&minute_zeroed, CronField::Hour.index(), "0")
}
