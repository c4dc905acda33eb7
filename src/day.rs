//! Calendar day identifiers, per-day state, and the startup snapshot
//!
//! The calendar has a fixed 24 days. Each day owns exactly one storage key
//! (`day1` .. `day24`), which is also its key in the outbound snapshot.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::BridgeError;

/// Prefix shared by storage keys and snapshot keys
pub const DAY_KEY_PREFIX: &str = "day";

/// A calendar day, 1..=24
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayId(u8);

impl DayId {
    /// Number of days in the calendar
    pub const COUNT: u8 = 24;

    pub const FIRST: DayId = DayId(1);
    pub const LAST: DayId = DayId(Self::COUNT);

    /// Validate a raw day number
    pub fn new(day: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&day).then_some(DayId(day))
    }

    /// All days in calendar order
    pub fn all() -> impl Iterator<Item = DayId> {
        (1..=Self::COUNT).map(DayId)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Storage key, e.g. `day7`
    pub fn key(self) -> String {
        format!("{}{}", DAY_KEY_PREFIX, self.0)
    }
}

impl TryFrom<u8> for DayId {
    type Error = BridgeError;

    fn try_from(day: u8) -> Result<Self, Self::Error> {
        DayId::new(day).ok_or(BridgeError::InvalidDay(day))
    }
}

impl From<DayId> for u8 {
    fn from(day: DayId) -> u8 {
        day.0
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One day's puzzle progress, owned by the application core
///
/// The bridge never looks inside; it only has to survive the codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayState(pub Value);

impl DayState {
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for DayState {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Inbound save request: `{ "day": 3, "model": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub day: DayId,
    pub model: DayState,
}

impl SaveRequest {
    pub fn new(day: DayId, model: impl Into<DayState>) -> Self {
        Self {
            day,
            model: model.into(),
        }
    }

    /// Parse the wire form; out-of-range days are rejected
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Every day's decoded state, as read once at startup
///
/// Always holds exactly one entry per day. Days that were never saved, or
/// whose stored text could not be decoded, are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    days: BTreeMap<DayId, Option<DayState>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl Snapshot {
    /// Snapshot with every day absent
    pub fn empty() -> Self {
        Self {
            days: DayId::all().map(|day| (day, None)).collect(),
        }
    }

    /// Set one day's entry
    pub fn insert(&mut self, day: DayId, state: Option<DayState>) {
        self.days.insert(day, state);
    }

    /// Decoded state for a day, `None` when absent
    pub fn get(&self, day: DayId) -> Option<&DayState> {
        self.days.get(&day).and_then(Option::as_ref)
    }

    /// Always `DayId::COUNT`
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of days with a decoded state
    pub fn present_count(&self) -> usize {
        self.days.values().filter(|s| s.is_some()).count()
    }

    /// Outbound wire form as a JSON object
    pub fn to_json(&self) -> String {
        // Keys are plain strings and values are already JSON, so this can't fail
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (day, state) in &self.days {
            map.serialize_entry(&day.key(), state)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_day_id_range() {
        assert!(DayId::new(0).is_none());
        assert!(DayId::new(25).is_none());
        assert_eq!(DayId::new(1), Some(DayId::FIRST));
        assert_eq!(DayId::new(24), Some(DayId::LAST));
        assert_eq!(DayId::all().count(), 24);
    }

    #[test]
    fn test_day_keys_unique() {
        let keys: std::collections::HashSet<String> = DayId::all().map(DayId::key).collect();
        assert_eq!(keys.len(), 24);
        assert!(keys.contains("day1"));
        assert!(keys.contains("day24"));
        // day1 + "1" must not collide with day11
        assert_ne!(DayId::new(1).unwrap().key(), DayId::new(11).unwrap().key());
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert!(matches!(DayId::try_from(30), Err(BridgeError::InvalidDay(30))));
        assert_eq!(DayId::try_from(5).unwrap().get(), 5);
    }

    #[test]
    fn test_save_request_wire_form() {
        let req = SaveRequest::from_json(r#"{"day": 3, "model": {"solved": true}}"#).unwrap();
        assert_eq!(req.day.get(), 3);
        assert_eq!(req.model, DayState(json!({"solved": true})));

        assert!(SaveRequest::from_json(r#"{"day": 0, "model": null}"#).is_err());
        assert!(SaveRequest::from_json(r#"{"day": 25, "model": null}"#).is_err());
        assert!(SaveRequest::from_json(r#"{"day": 300, "model": null}"#).is_err());
    }

    #[test]
    fn test_empty_snapshot_has_every_day() {
        let snapshot = Snapshot::empty();
        assert_eq!(snapshot.len(), 24);
        assert_eq!(snapshot.present_count(), 0);
        assert!(DayId::all().all(|day| snapshot.get(day).is_none()));
    }

    #[test]
    fn test_snapshot_wire_keys() {
        let mut snapshot = Snapshot::empty();
        snapshot.insert(DayId::new(3).unwrap(), Some(DayState(json!([1, 2, 3]))));

        let value: Value = serde_json::from_str(&snapshot.to_json()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 24);
        for n in 1..=24 {
            assert!(obj.contains_key(&format!("day{n}")), "missing day{n}");
        }
        assert_eq!(obj["day3"], json!([1, 2, 3]));
        assert_eq!(obj["day4"], Value::Null);
    }

    #[test]
    fn test_snapshot_insert_order_not_observable() {
        let mut forward = Snapshot::empty();
        let mut backward = Snapshot::empty();
        for day in DayId::all() {
            forward.insert(day, Some(DayState(json!(day.get()))));
        }
        for day in DayId::all().collect::<Vec<_>>().into_iter().rev() {
            backward.insert(day, Some(DayState(json!(day.get()))));
        }
        assert_eq!(forward, backward);
        assert_eq!(forward.to_json(), backward.to_json());
    }
}
