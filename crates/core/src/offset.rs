use serde::{Deserialize, Serialize};

use crate::presence::MINUTES_PER_DAY;

/// A fixed shift from UTC, in whole minutes.
///
/// This is a constant offset, not a timezone: there are no DST rules behind it.
/// Fractional-hour offsets (Asia/Kolkata at +5:30, Asia/Kathmandu at +5:45) are
/// representable down to 15-minute granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeZoneOffset {
    minutes: i32,
}

impl TimeZoneOffset {
    pub const UTC: TimeZoneOffset = TimeZoneOffset { minutes: 0 };

    pub const fn from_hours(hours: i32) -> Self {
        Self { minutes: hours.saturating_mul(60) }
    }

    pub const fn from_minutes(minutes: i32) -> Self {
        Self { minutes }
    }

    /// Offset from fractional hours such as `5.5` or `-3.5`.
    ///
    /// Returns `None` for non-finite input or values that are not a multiple of
    /// 15 minutes.
    pub fn from_fractional_hours(hours: f64) -> Option<Self> {
        if !hours.is_finite() {
            return None;
        }
        let quarters = hours * 4.0;
        if quarters.fract() != 0.0 || quarters.abs() > f64::from(i32::MAX / 15) {
            return None;
        }
        Some(Self {
            minutes: quarters as i32 * 15,
        })
    }

    pub fn minutes(self) -> i32 {
        self.minutes
    }

    pub fn hours(self) -> f64 {
        f64::from(self.minutes) / 60.0
    }

    /// Shift a minute-of-day by this offset, wrapping across midnight.
    pub fn shift_minute_of_day(self, minute_of_day: u32) -> u32 {
        let day = MINUTES_PER_DAY as i64;
        (i64::from(minute_of_day) + i64::from(self.minutes)).rem_euclid(day) as u32
    }
}

impl std::fmt::Display for TimeZoneOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let abs = self.minutes.unsigned_abs();
        write!(f, "UTC{}{:02}:{:02}", sign, abs / 60, abs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_hours_round_trip_to_minutes() {
        assert_eq!(TimeZoneOffset::from_fractional_hours(5.5).map(|o| o.minutes()), Some(330));
        assert_eq!(TimeZoneOffset::from_fractional_hours(-3.5).map(|o| o.minutes()), Some(-210));
        assert_eq!(TimeZoneOffset::from_fractional_hours(5.75).map(|o| o.minutes()), Some(345));
        assert_eq!(TimeZoneOffset::from_fractional_hours(2.0), Some(TimeZoneOffset::from_hours(2)));
    }

    #[test]
    fn rejects_odd_fractions() {
        assert_eq!(TimeZoneOffset::from_fractional_hours(1.1), None);
        assert_eq!(TimeZoneOffset::from_fractional_hours(f64::NAN), None);
        assert_eq!(TimeZoneOffset::from_fractional_hours(f64::INFINITY), None);
    }

    #[test]
    fn shift_wraps_both_directions() {
        // 23:30 + 2h -> 01:30
        assert_eq!(TimeZoneOffset::from_hours(2).shift_minute_of_day(23 * 60 + 30), 90);
        // 00:15 - 1h -> 23:15
        assert_eq!(TimeZoneOffset::from_hours(-1).shift_minute_of_day(15), 23 * 60 + 15);
        assert_eq!(TimeZoneOffset::from_hours(24).shift_minute_of_day(42), 42);
    }

    #[test]
    fn display_formats_sign_and_minutes() {
        assert_eq!(TimeZoneOffset::from_minutes(330).to_string(), "UTC+05:30");
        assert_eq!(TimeZoneOffset::from_hours(-8).to_string(), "UTC-08:00");
        assert_eq!(TimeZoneOffset::UTC.to_string(), "UTC+00:00");
    }
}
