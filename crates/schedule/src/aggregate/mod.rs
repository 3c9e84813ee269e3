//! Aggregators that fold a schedule's occurrences into presence structures.
//!
//! Both aggregators share one failure policy: a parse or enumeration failure
//! yields the empty (or all-zero) structure together with the reason, and a
//! `warn!` diagnostic. The `try_` variants return the error instead.

mod daily;
mod yearly;

#[cfg(test)]
mod tests;

pub use daily::{
    run_time_slots, run_time_slots_on, run_times_in_day, try_run_time_slots_on,
    try_run_times_in_day,
};
pub use yearly::{run_days, run_days_normalized, try_run_days, MAX_YEAR, MIN_YEAR};
