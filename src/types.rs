//! Common types used throughout rewards-audit
//!
//! Shared type aliases and small helpers for working with the loosely
//! structured records of the input datasets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Dataset
// ============================================================================

/// A named set of records loaded from one file
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Dataset (and root table) name
    pub name: String,
    /// Records in file order
    pub records: Vec<JsonValue>,
}

impl Dataset {
    /// Create a dataset from already-decoded records
    pub fn new(name: impl Into<String>, records: Vec<JsonValue>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// Output Format
// ============================================================================

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text (DDL for schemas)
    #[default]
    Text,
    /// JSON documents
    Json,
}

// ============================================================================
// Extended JSON helpers
// ============================================================================

/// Whether `value` is a date wrapper: a mapping whose only key is `$date`
pub fn is_date_wrapper(value: &JsonValue) -> bool {
    matches!(value, JsonValue::Object(map) if map.len() == 1 && map.contains_key("$date"))
}

/// Returns the millisecond timestamp if `value` is exactly `{"$date": <int>}`
pub fn as_date_millis(value: &JsonValue) -> Option<i64> {
    if is_date_wrapper(value) {
        value.get("$date").and_then(JsonValue::as_i64)
    } else {
        None
    }
}

/// Converts a `{"$date": <ms>}` wrapper into a UTC timestamp
pub fn as_datetime(value: &JsonValue) -> Option<DateTime<Utc>> {
    as_date_millis(value).and_then(DateTime::<Utc>::from_timestamp_millis)
}

/// Renders an identifier as a plain string, unwrapping `{"$oid": ".."}`
pub fn id_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Object(map) => match map.get("$oid") {
            Some(JsonValue::String(oid)) => Some(oid.clone()),
            _ => Some(value.to_string()),
        },
        other => Some(other.to_string()),
    }
}

/// Reads a numeric value that may be stored as a JSON number or a numeric string
pub fn as_f64_lenient(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Looks up a field, treating JSON `null` the same as absence
pub fn present<'a>(record: &'a JsonValue, field: &str) -> Option<&'a JsonValue> {
    record.get(field).filter(|v| !v.is_null())
}
