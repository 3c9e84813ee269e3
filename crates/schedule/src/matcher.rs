//! Single-field parsing: `*`, `*/n`, `a`, `a-b`, `a-b/n`, `a/n` and comma lists.
//!
//! A parsed field is a [`FieldSet`], a bitmask over the field's domain.

use cronscope_core::{CronField, Result, ScheduleError};

const MONTH_NAMES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

const DAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// The set of values one cron field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSet {
    field: CronField,
    bits: u64,
}

impl FieldSet {
    /// Parse one field's text. Fails on empty items, out-of-range literals,
    /// zero or non-numeric steps, and reversed ranges.
    pub fn parse(field: CronField, text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(ScheduleError::semantic(field, text, "field is empty"));
        }

        let mut bits = 0u64;
        for item in text.split(',') {
            bits |= parse_item(field, item, text)?;
        }

        // Day-of-week 7 is Sunday.
        if field == CronField::DayOfWeek && bits & (1 << 7) != 0 {
            bits = (bits & !(1 << 7)) | 1;
        }

        Ok(Self { field, bits })
    }

    pub fn field(&self) -> CronField {
        self.field
    }

    pub fn contains(&self, value: u32) -> bool {
        value < 64 && self.bits & (1u64 << value) != 0
    }

    /// Smallest member `>= value`, if any.
    pub fn next_at_or_after(&self, value: u32) -> Option<u32> {
        if value >= 64 {
            return None;
        }
        let masked = self.bits & (u64::MAX << value);
        (masked != 0).then(|| masked.trailing_zeros())
    }

    pub fn first(&self) -> Option<u32> {
        self.next_at_or_after(0)
    }

    /// Whether the set covers the field's whole domain.
    pub fn is_full(&self) -> bool {
        let (min, max) = domain(self.field);
        (min..=max).all(|v| self.contains(v))
    }

    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        (0..64).filter(move |v| self.contains(*v))
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

/// Effective domain after folding day-of-week 7 onto 0.
pub(crate) fn domain(field: CronField) -> (u32, u32) {
    match field {
        CronField::DayOfWeek => (0, 6),
        other => other.bounds(),
    }
}

fn parse_item(field: CronField, item: &str, whole: &str) -> Result<u64> {
    if item.is_empty() {
        return Err(ScheduleError::semantic(field, whole, "empty list item"));
    }

    let (range, step) = match item.split_once('/') {
        Some((range, step)) => (range, Some(parse_step(field, step, whole)?)),
        None => (item, None),
    };

    let (min, max) = field.bounds();
    let (start, end) = if range == "*" {
        domain(field)
    } else if let Some((a, b)) = range.split_once('-') {
        let start = parse_value(field, a).ok_or_else(|| bad_value(field, whole, a))?;
        let end = parse_value(field, b).ok_or_else(|| bad_value(field, whole, b))?;
        if start > end {
            return Err(ScheduleError::semantic(
                field,
                whole,
                format!("range start {start} is greater than end {end}"),
            ));
        }
        (start, end)
    } else {
        let value = parse_value(field, range).ok_or_else(|| bad_value(field, whole, range))?;
        match step {
            // `a/n` runs from `a` to the end of the domain.
            Some(_) => (value, domain(field).1.max(value)),
            None => (value, value),
        }
    };

    if start < min || end > max {
        return Err(ScheduleError::semantic(
            field,
            whole,
            format!("values must be within {min}-{max}"),
        ));
    }

    let step = step.unwrap_or(1);
    let mut bits = 0u64;
    let mut v = start;
    while v <= end {
        bits |= 1u64 << v;
        v = match v.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(bits)
}

fn parse_step(field: CronField, step: &str, whole: &str) -> Result<u32> {
    match parse_number(step) {
        Some(n) if n > 0 => Ok(n),
        _ => Err(ScheduleError::semantic(
            field,
            whole,
            format!("step '{step}' must be a positive integer"),
        )),
    }
}

fn bad_value(field: CronField, whole: &str, token: &str) -> ScheduleError {
    let (min, max) = field.bounds();
    ScheduleError::semantic(
        field,
        whole,
        format!("'{token}' is not a value within {min}-{max}"),
    )
}

fn parse_number(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Parse a literal, accepting month and weekday names where they apply.
/// Range checking is left to the caller.
pub(crate) fn parse_value(field: CronField, token: &str) -> Option<u32> {
    if let Some(n) = parse_number(token) {
        return Some(n);
    }
    let upper = token.to_ascii_uppercase();
    match field {
        CronField::Month => MONTH_NAMES.iter().position(|n| *n == upper).map(|i| i as u32 + 1),
        CronField::DayOfWeek => DAY_NAMES.iter().position(|n| *n == upper).map(|i| i as u32),
        _ => None,
    }
}
