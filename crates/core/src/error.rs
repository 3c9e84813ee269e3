use serde::Serialize;
use thiserror::Error;

use crate::field::CronField;

/// Everything that can go wrong while parsing or enumerating a schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleError {
    /// Wrong number of whitespace-separated fields.
    #[error("Cron expression must have exactly 5 fields (minute hour day-of-month month day-of-week), got {found}")]
    Structural { found: usize },

    /// A field is well-formed text but denotes an empty or out-of-range set.
    #[error("Invalid {field} field '{value}': {reason}")]
    Semantic {
        field: CronField,
        value: String,
        reason: String,
    },

    #[error("Year {year} is outside the supported range {min}-{max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    /// The search horizon elapsed before the requested window was covered.
    #[error("No occurrence found within the {horizon_years}-year search horizon")]
    EnumerationExhausted { horizon_years: u32 },

    /// Field index outside 0-4. A caller bug, never bad user input.
    #[error("Invalid field index {index}, expected 0-4")]
    FieldIndex { index: usize },
}

impl ScheduleError {
    pub fn semantic(
        field: CronField,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ScheduleError::Semantic {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Whether an aggregator may fold this error into an empty result.
    ///
    /// Everything except `FieldIndex` is.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ScheduleError::FieldIndex { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
