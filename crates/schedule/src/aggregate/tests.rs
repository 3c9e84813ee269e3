//! Tests for the aggregate module.

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use cronscope_core::{ScanConfig, ScheduleError, TimeZoneOffset};

    use crate::aggregate::{
        run_days, run_days_normalized, run_time_slots, run_time_slots_on, run_times_in_day,
        try_run_days,
    };
    use crate::cursor::next_occurrences;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config() -> ScanConfig {
        ScanConfig::default()
    }

    // -- yearly ------------------------------------------------------------

    #[test]
    fn new_years_day_only() {
        let agg = run_days("0 0 1 1 *", 2024, &config());
        assert!(agg.is_ok());
        let entries: Vec<(&str, u8)> = agg.value.entries().collect();
        assert_eq!(entries, vec![("2024-01-01", 1)]);
    }

    #[test]
    fn keys_stay_inside_target_year() {
        for expr in ["0 0 * * *", "0 0 31 12 *", "0 0 1 * *", "*/30 * * * *", "59 23 31 12 *"] {
            let days = run_days(expr, 2024, &config()).value;
            assert!(!days.is_empty(), "{expr}");
            assert!(days.keys().all(|k| k.starts_with("2024-")), "{expr}");
        }
    }

    #[test]
    fn every_day_of_a_leap_year() {
        assert_eq!(run_days("0 0 * * *", 2024, &config()).value.len(), 366);
        assert_eq!(run_days("0 0 * * *", 2023, &config()).value.len(), 365);
        // Time-of-day does not matter to the day count.
        assert_eq!(run_days("*/30 * * * *", 2024, &config()).value.len(), 366);
    }

    #[test]
    fn weekdays_of_2024() {
        let days = run_days("0 0 * * 1-5", 2024, &config()).value;
        assert_eq!(days.len(), 262);
        assert!(days.contains_key("2024-01-01")); // Monday
        assert!(!days.contains_key("2024-01-06")); // Saturday
    }

    #[test]
    fn leap_day_schedule() {
        let leap = run_days("0 0 29 2 *", 2024, &config());
        assert_eq!(leap.value.keys().collect::<Vec<_>>(), vec!["2024-02-29"]);

        let common = run_days("0 0 29 2 *", 2023, &config());
        assert!(common.is_ok());
        assert!(common.value.is_empty());
    }

    #[test]
    fn normalized_matches_hand_normalized() {
        let normalized = run_days_normalized("*/15 9-17 * * 1-5", 2024, &config());
        let manual = run_days("0 0 * * 1-5", 2024, &config());
        assert_eq!(normalized, manual);
    }

    #[test]
    fn malformed_expression_yields_empty_set() {
        let agg = run_days("*/0 * * * *", 2024, &config());
        assert!(agg.value.is_empty());
        assert!(matches!(agg.failure, Some(ScheduleError::Semantic { .. })));

        let agg = run_days_normalized("* * * *", 2024, &config());
        assert!(agg.value.is_empty());
        assert_eq!(agg.failure, Some(ScheduleError::Structural { found: 4 }));
    }

    #[test]
    fn year_out_of_range() {
        assert_eq!(
            try_run_days("0 0 * * *", 1899, &config()),
            Err(ScheduleError::YearOutOfRange {
                year: 1899,
                min: 1900,
                max: 2100
            })
        );
        assert!(try_run_days("0 0 * * *", 2100, &config()).is_ok());
    }

    #[test]
    fn horizon_limits_gaps_not_the_window() {
        let short = ScanConfig::default().with_horizon_years(1);

        let dense = run_days("0 0 * * *", 2024, &short);
        assert!(dense.is_ok());
        assert_eq!(dense.value.len(), 366);

        let leap = run_days("0 0 29 2 *", 2023, &short);
        assert!(leap.is_ok());
        assert!(leap.value.is_empty());

        // Leap days are four years apart.
        assert_eq!(
            next_occurrences("0 0 29 2 *", day(2024, 3, 1).and_time(NaiveTime::MIN), 1, &short),
            Err(ScheduleError::EnumerationExhausted { horizon_years: 1 })
        );
    }

    #[test]
    fn lookback_longer_than_horizon_is_exhaustion() {
        let config = ScanConfig::default()
            .with_horizon_years(1)
            .with_lookback_days(1000);
        let agg = run_time_slots_on("0 0 29 2 *", TimeZoneOffset::UTC, day(2024, 10, 17), &config);
        assert_eq!(agg.value.count(), 0);
        assert_eq!(
            agg.failure,
            Some(ScheduleError::EnumerationExhausted { horizon_years: 1 })
        );
    }

    #[test]
    fn yearly_is_idempotent() {
        let a = run_days("0 0 */3 * 0,6", 2025, &config());
        let b = run_days("0 0 */3 * 0,6", 2025, &config());
        assert_eq!(a, b);
    }

    // -- daily -------------------------------------------------------------

    #[test]
    fn vector_is_always_1440_long() {
        let reference = day(2024, 10, 17);
        for expr in ["* * * * *", "0 9 * * 1", "*/0 * * * *", "* * *", "", "0 0 29 2 *"] {
            let agg = run_time_slots_on(expr, TimeZoneOffset::UTC, reference, &config());
            assert_eq!(agg.value.len(), 1440, "{expr}");
        }
        assert_eq!(run_time_slots("* * * * *", TimeZoneOffset::UTC, &config()).value.len(), 1440);
    }

    #[test]
    fn every_minute_fills_the_day() {
        let agg = run_time_slots_on("* * * * *", TimeZoneOffset::UTC, day(2024, 10, 17), &config());
        assert_eq!(agg.value.count(), 1440);
    }

    #[test]
    fn quarter_hours() {
        let v = run_time_slots_on("*/15 * * * *", TimeZoneOffset::UTC, day(2024, 10, 17), &config()).value;
        assert_eq!(v.count(), 96);
        assert!(v.at(13, 45));
        assert!(!v.at(13, 46));
    }

    #[test]
    fn offset_wraps_past_midnight() {
        let v = run_time_slots_on(
            "30 23 * * *",
            TimeZoneOffset::from_hours(2),
            day(2024, 10, 17),
            &config(),
        )
        .value;
        assert!(v.at(1, 30));
        assert!(!v.at(23, 30));
        assert_eq!(v.count(), 1);

        let v = run_time_slots_on(
            "0 3 * * *",
            TimeZoneOffset::from_hours(-5),
            day(2024, 10, 17),
            &config(),
        )
        .value;
        assert_eq!(v.active_times(), vec!["22:00"]);
    }

    #[test]
    fn fractional_offset() {
        let offset = TimeZoneOffset::from_fractional_hours(5.5).unwrap();
        let v = run_time_slots_on("0 0 * * *", offset, day(2024, 10, 17), &config()).value;
        assert_eq!(v.active_times(), vec!["05:30"]);
    }

    #[test]
    fn weekly_schedule_is_caught_by_lookback() {
        // 2024-10-17 is a Thursday; the Monday before is inside the lookback.
        let agg = run_time_slots_on("0 9 * * 1", TimeZoneOffset::UTC, day(2024, 10, 17), &config());
        assert_eq!(agg.value.active_times(), vec!["09:00"]);

        let no_lookback = ScanConfig::default().with_lookback_days(0);
        let agg = run_time_slots_on("0 9 * * 1", TimeZoneOffset::UTC, day(2024, 10, 17), &no_lookback);
        assert!(agg.is_ok());
        assert_eq!(agg.value.count(), 0);
    }

    #[test]
    fn lookback_start_is_exclusive() {
        // The window opens at 2024-10-10 00:00, which is not itself replayed.
        let agg = run_time_slots_on("0 0 10 * *", TimeZoneOffset::UTC, day(2024, 10, 17), &config());
        assert!(agg.is_ok());
        assert_eq!(agg.value.count(), 0);

        let agg = run_time_slots_on("1 0 10 * *", TimeZoneOffset::UTC, day(2024, 10, 17), &config());
        assert_eq!(agg.value.active_times(), vec!["00:01"]);
    }

    #[test]
    fn rare_schedule_is_empty_not_failed() {
        let agg = run_time_slots_on("0 0 29 2 *", TimeZoneOffset::UTC, day(2024, 10, 17), &config());
        assert!(agg.is_ok());
        assert_eq!(agg.value.count(), 0);
    }

    #[test]
    fn malformed_expression_yields_zeroed_vector() {
        let agg = run_time_slots_on("*/0 * * * *", TimeZoneOffset::UTC, day(2024, 10, 17), &config());
        assert_eq!(agg.value.len(), 1440);
        assert_eq!(agg.value.count(), 0);
        assert!(matches!(agg.failure, Some(ScheduleError::Semantic { .. })));
    }

    #[test]
    fn time_slots_are_idempotent() {
        let offset = TimeZoneOffset::from_hours(3);
        let a = run_time_slots_on("7,37 */5 * * *", offset, day(2025, 2, 1), &config());
        let b = run_time_slots_on("7,37 */5 * * *", offset, day(2025, 2, 1), &config());
        assert_eq!(a, b);
    }

    // -- times in day ------------------------------------------------------

    #[test]
    fn times_in_day_lists_only_that_day() {
        let agg = run_times_in_day("0 */6 * * *", day(2024, 10, 17), &config());
        assert_eq!(agg.value, vec!["00:00", "06:00", "12:00", "18:00"]);

        // Monday-only schedule on a Thursday.
        let agg = run_times_in_day("0 9 * * 1", day(2024, 10, 17), &config());
        assert!(agg.is_ok());
        assert!(agg.value.is_empty());
    }

    #[test]
    fn times_in_day_failure_is_empty() {
        let agg = run_times_in_day("61 * * * *", day(2024, 10, 17), &config());
        assert!(agg.value.is_empty());
        assert!(agg.failure.is_some());
    }
}
