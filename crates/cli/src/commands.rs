//! Subcommand handlers. Each returns the JSON document to print.

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use serde_json::{json, Value};

use cronscope_core::{ScanConfig, TimeZoneOffset};
use cronscope_schedule::{
    describe, is_structurally_valid, next_occurrences, run_days, run_days_normalized,
    run_time_slots_on, run_times_in_day, time_zones_by_offset, validate,
};

use crate::cli::Command;

pub fn run(command: &Command, config: &ScanConfig) -> Result<Value> {
    match command {
        Command::Validate { expression } => {
            let verdict = validate(expression);
            Ok(json!({
                "expression": expression,
                "structurally_valid": is_structurally_valid(expression),
                "valid": verdict.is_ok(),
                "error": verdict.err().map(|e| e.to_string()),
            }))
        }

        Command::Days {
            expression,
            year,
            raw,
        } => {
            let year = year.unwrap_or_else(|| Utc::now().year());
            let days = if *raw {
                run_days(expression, year, config)
            } else {
                run_days_normalized(expression, year, config)
            };
            serde_json::to_value(&days).context("failed to encode day set")
        }

        Command::Slots {
            expression,
            offset,
            day,
            active_only,
        } => {
            let offset = parse_offset(*offset)?;
            let day = day.unwrap_or_else(|| Utc::now().date_naive());
            let slots = run_time_slots_on(expression, offset, day, config);
            if *active_only {
                Ok(json!({
                    "offset": offset.to_string(),
                    "zones": time_zones_by_offset(offset),
                    "times": slots.value.active_times(),
                    "failure": slots.failure,
                }))
            } else {
                serde_json::to_value(&slots).context("failed to encode time slots")
            }
        }

        Command::Times { expression, day } => {
            let day = day.unwrap_or_else(|| Utc::now().date_naive());
            let times = run_times_in_day(expression, day, config);
            serde_json::to_value(&times).context("failed to encode times")
        }

        Command::Next {
            expression,
            count,
            after,
        } => {
            let after = after.unwrap_or_else(|| Utc::now().naive_utc());
            let instants = next_occurrences(expression, after, *count, config)
                .with_context(|| format!("failed to enumerate '{expression}'"))?;
            let formatted: Vec<String> = instants
                .iter()
                .map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
                .collect();
            Ok(json!({ "expression": expression, "next": formatted }))
        }

        Command::Zones { offset } => {
            let offset = parse_offset(*offset)?;
            Ok(json!({
                "offset": offset.to_string(),
                "zones": time_zones_by_offset(offset),
            }))
        }

        Command::Describe { expression } => Ok(json!({
            "expression": expression,
            "description": describe(expression),
        })),
    }
}

fn parse_offset(hours: f64) -> Result<TimeZoneOffset> {
    TimeZoneOffset::from_fractional_hours(hours)
        .with_context(|| format!("offset {hours} is not a whole number of quarter hours"))
}
