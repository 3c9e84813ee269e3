//! 5-field cron expression text and the cheap structural gate.

use std::fmt;
use std::str::FromStr;

use cronscope_core::{CronField, Result, ScheduleError};

use crate::descriptor::ScheduleDescriptor;

/// Number of fields in a supported cron expression.
pub const FIELD_COUNT: usize = 5;

/// Structural check: exactly 5 whitespace-separated tokens.
///
/// Says nothing about whether the fields hold legal values; use [`validate`]
/// when correctness matters.
pub fn is_structurally_valid(expr: &str) -> bool {
    expr.split_whitespace().count() == FIELD_COUNT
}

/// Full semantic validation of an expression.
pub fn validate(expr: &str) -> Result<()> {
    ScheduleDescriptor::parse(expr).map(|_| ())
}

/// The raw text of the five fields, `minute hour day-of-month month day-of-week`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CronExpression {
    fields: [String; FIELD_COUNT],
}

impl CronExpression {
    /// Split `expr` into fields. Only the field count is checked here.
    pub fn parse(expr: &str) -> Result<Self> {
        let parts: Vec<&str> = expr.split_whitespace().collect();
        let fields: [String; FIELD_COUNT] = match parts.as_slice() {
            [minute, hour, dom, month, dow] => [
                minute.to_string(),
                hour.to_string(),
                dom.to_string(),
                month.to_string(),
                dow.to_string(),
            ],
            _ => return Err(ScheduleError::Structural { found: parts.len() }),
        };
        Ok(Self { fields })
    }

    pub fn field(&self, field: CronField) -> &str {
        &self.fields[field.index()]
    }


    /// Copy of this expression with one field replaced by `value`.
    ///
    /// `value` must be a single non-empty token; its contents are not
    /// validated until the result is parsed into a [`ScheduleDescriptor`].
    pub fn with_field(&self, field: CronField, value: &str) -> Result<Self> {
        let mut tokens = value.split_whitespace();
        let token = match (tokens.next(), tokens.next()) {
            (Some(token), None) => token,
            _ => {
                return Err(ScheduleError::semantic(
                    field,
                    value,
                    "replacement must be a single token",
                ))
            }
        };
        let mut fields = self.fields.clone();
        fields[field.index()] = token.to_string();
        Ok(Self { fields })
    }
}

impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields.join(" "))
    }
}

impl FromStr for CronExpression {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
