//! Aggregator output types: per-day and per-minute presence.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

use crate::error::ScheduleError;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Marker stored against every day and minute that has at least one firing.
pub const PRESENT: u8 = 1;

/// Format a minute-of-day (0..1440) as `HH:MM`.
pub fn format_minute_of_day(minute_of_day: u32) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

// ── Days ──────────────────────────────────────────────────────

/// Distinct `YYYY-MM-DD` days on which a schedule fires, each mapped to `1`.
///
/// Serializes as a JSON object (`{"2024-01-01": 1}`). Keys iterate in
/// chronological order since the zero-padded format sorts lexically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DayPresenceSet {
    days: BTreeMap<String, u8>,
}

impl DayPresenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a day. Returns `false` if it was already present.
    pub fn insert(&mut self, day: NaiveDate) -> bool {
        let key = day.format("%Y-%m-%d").to_string();
        if self.days.contains_key(&key) {
            return false;
        }
        self.days.insert(key, PRESENT);
        true
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.days.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<u8> {
        self.days.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.days.keys().map(String::as_str)
    }

    /// `(day, 1)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u8)> {
        self.days.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// ── Minutes ───────────────────────────────────────────────────

/// One cell of a [`MinutePresenceVector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinuteSlot {
    pub time: String,
    pub value: u8,
}

/// Dense presence flags for every minute of a day, `00:00` through `23:59`.
///
/// Always exactly [`MINUTES_PER_DAY`] entries long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinutePresenceVector {
    values: Vec<u8>,
}

impl Default for MinutePresenceVector {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl MinutePresenceVector {
    /// All 1440 minutes absent.
    pub fn zeroed() -> Self {
        Self {
            values: vec![0; MINUTES_PER_DAY as usize],
        }
    }

    /// Materialize the dense vector from the set of minutes that fire.
    /// Minutes outside `0..1440` are ignored.
    pub fn from_minutes(minutes: &BTreeSet<u32>) -> Self {
        let values = (0..MINUTES_PER_DAY)
            .map(|m| if minutes.contains(&m) { PRESENT } else { 0 })
            .collect();
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn is_set(&self, minute_of_day: u32) -> bool {
        self.values
            .get(minute_of_day as usize)
            .is_some_and(|v| *v == PRESENT)
    }

    /// Presence at `hour:minute`.
    pub fn at(&self, hour: u32, minute: u32) -> bool {
        hour < 24 && minute < 60 && self.is_set(hour * 60 + minute)
    }

    /// Number of minutes that fire.
    pub fn count(&self) -> usize {
        self.values.iter().filter(|v| **v == PRESENT).count()
    }

    /// `HH:MM` labels of the minutes that fire, in chronological order.
    pub fn active_times(&self) -> Vec<String> {
        self.slots()
            .filter(|slot| slot.value == PRESENT)
            .map(|slot| slot.time)
            .collect()
    }

    /// Every minute as a labelled slot, in chronological order.
    pub fn slots(&self) -> impl Iterator<Item = MinuteSlot> + '_ {
        self.values.iter().enumerate().map(|(m, v)| MinuteSlot {
            time: format_minute_of_day(m as u32),
            value: *v,
        })
    }
}

impl Serialize for MinutePresenceVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.values.len()))?;
        for slot in self.slots() {
            seq.serialize_element(&slot)?;
        }
        seq.end()
    }
}

// ── Aggregation result ────────────────────────────────────────

/// Result of an aggregator call.
///
/// On failure `value` is the empty (or zeroed) structure and `failure` says why.
/// Callers that only render data can ignore `failure` entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregation<T> {
    pub value: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ScheduleError>,
}

impl<T: Default> Aggregation<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            failure: None,
        }
    }

    pub fn failed(error: ScheduleError) -> Self {
        Self {
            value: T::default(),
            failure: Some(error),
        }
    }

    pub fn from_result(result: crate::error::Result<T>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(e) => Self::failed(e),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_set_deduplicates() {
        let mut days = DayPresenceSet::new();
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(days.insert(d));
        assert!(!days.insert(d));
        assert_eq!(days.len(), 1);
        assert_eq!(days.get("2024-01-01"), Some(1));
    }

    #[test]
    fn day_set_serializes_as_object() {
        let mut days = DayPresenceSet::new();
        days.insert(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        days.insert(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let json = serde_json::to_string(&days).unwrap();
        assert_eq!(json, r#"{"2024-01-01":1,"2024-03-09":1}"#);
    }

    #[test]
    fn zeroed_vector_is_full_length() {
        let v = MinutePresenceVector::zeroed();
        assert_eq!(v.len(), 1440);
        assert_eq!(v.count(), 0);
    }

    #[test]
    fn vector_from_minutes_ignores_out_of_range() {
        let minutes: BTreeSet<u32> = [0, 90, 1439, 5000].into_iter().collect();
        let v = MinutePresenceVector::from_minutes(&minutes);
        assert_eq!(v.len(), 1440);
        assert_eq!(v.count(), 3);
        assert!(v.at(1, 30));
        assert_eq!(v.active_times(), vec!["00:00", "01:30", "23:59"]);
    }

    #[test]
    fn vector_serializes_as_time_value_pairs() {
        let minutes: BTreeSet<u32> = [1].into_iter().collect();
        let v = MinutePresenceVector::from_minutes(&minutes);
        let json = serde_json::to_value(&v).unwrap();
        let slots = json.as_array().unwrap();
        assert_eq!(slots.len(), 1440);
        assert_eq!(slots[1], serde_json::json!({"time": "00:01", "value": 1}));
        assert_eq!(slots[1439], serde_json::json!({"time": "23:59", "value": 0}));
    }

    #[test]
    fn failed_aggregation_carries_reason_and_default() {
        let agg: Aggregation<MinutePresenceVector> =
            Aggregation::failed(ScheduleError::Structural { found: 4 });
        assert!(!agg.is_ok());
        assert_eq!(agg.value.len(), 1440);
        assert!(agg.failure.is_some());
    }
}
