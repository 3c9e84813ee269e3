//! Cron schedule analysis.
//!
//! This crate provides:
//! - 5-field expression parsing and validation (`minute hour dom month dow`)
//! - A bounded, lazy cursor over firing instants
//! - Yearly day-presence and daily minute-presence aggregation
//! - Field rewriting, offset zone labels, and plain-English descriptions

pub mod aggregate;
pub mod cursor;
pub mod describe;
pub mod descriptor;
pub mod editor;
pub mod expression;
pub mod matcher;
pub mod timezones;

pub use aggregate::{
    run_days, run_days_normalized, run_time_slots, run_time_slots_on, run_times_in_day,
    try_run_days, try_run_time_slots_on, try_run_times_in_day,
};
pub use cursor::{next_occurrences, OccurrenceCursor};
pub use describe::describe;
pub use descriptor::ScheduleDescriptor;
pub use editor::{modify_field, normalize_time_of_day};
pub use expression::{is_structurally_valid, validate, CronExpression};
pub use timezones::time_zones_by_offset;
