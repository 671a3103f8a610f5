use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::fmt;

use crate::constants::MAX_EXACT_F64_INTEGER;
use crate::error::{DedupError, Result};

/// One lead entry. Field order is the order the fields had in the input.
pub type Record = Map<String, Value>;

/// An ordered sequence of records; position is the tie-break index.
pub type Dataset = Vec<Record>;

/// Append-only audit trail of every overwrite, across all passes.
pub type ChangeLog = Vec<ChangeEntry>;

/// One field whose value differs between a superseded record and its replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDelta {
    pub field: String,
    pub from: Value,
    pub to: Value,
}

/// One overwrite event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub source: Record,
    pub updated: Record,
    pub changes: Vec<FieldDelta>,
}

/// Grouping identity of a key field value.
///
/// Built from the JSON text of a scalar, so `"1"` and `1` stay distinct keys.
/// Integer-valued numbers are written without a fraction, so `1` and `1.0`
/// group together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyValue(String);

impl KeyValue {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => Some(Self(canonical_number(number))),
            Value::String(_) | Value::Bool(_) => Some(Self(value.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

fn canonical_number(number: &Number) -> String {
    if let Some(n) = number.as_i64() {
        return n.to_string();
    }
    if let Some(n) = number.as_u64() {
        return n.to_string();
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_F64_INTEGER => (f as i64).to_string(),
        _ => number.to_string(),
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads the key field of the record at `index`.
pub fn key_value(record: &Record, field: &str, index: usize) -> Result<KeyValue> {
    let value = record.get(field).ok_or_else(|| DedupError::MissingKeyField {
        index,
        field: field.to_string(),
    })?;

    KeyValue::from_value(value).ok_or_else(|| DedupError::UnsupportedKeyValue {
        index,
        field: field.to_string(),
    })
}

/// Reads the entry timestamp of the record at `index`.
pub fn timestamp<'a>(record: &'a Record, field: &str, index: usize) -> Result<&'a Value> {
    record.get(field).ok_or_else(|| DedupError::MissingTimestamp {
        index,
        field: field.to_string(),
    })
}

/// Orders two timestamp values. Strings compare lexicographically and numbers
/// numerically; every other pairing is unordered.
pub fn compare_timestamps(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        _ => None,
    }
}

fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return Some(a.cmp(&b));
    }
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}
