//! Decoder implementations

use super::types::{DecoderFormat, RecordDecoder};
use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

// ============================================================================
// JSONL Decoder
// ============================================================================

/// JSON Lines decoder (one JSON object per line)
#[derive(Debug, Clone, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a new JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonlDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let mut records = Vec::new();

        for (line_num, line) in body.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let value: Value = serde_json::from_str(line).map_err(|e| {
                Error::decode(format!("Failed to parse JSONL at line {}: {e}", line_num + 1))
            })?;

            if !value.is_object() {
                return Err(Error::decode(format!(
                    "Line {} is not a JSON object",
                    line_num + 1
                )));
            }

            records.push(value);
        }

        Ok(records)
    }
}

// ============================================================================
// JSON Array Decoder
// ============================================================================

/// Decoder for a file holding one JSON array of objects
#[derive(Debug, Clone, Default)]
pub struct JsonArrayDecoder;

impl JsonArrayDecoder {
    /// Create a new JSON array decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonArrayDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

        let Value::Array(items) = value else {
            return Err(Error::decode("Expected a top-level JSON array"));
        };

        if let Some(pos) = items.iter().position(|v| !v.is_object()) {
            return Err(Error::decode(format!(
                "Array element {pos} is not a JSON object"
            )));
        }

        Ok(items)
    }
}

// ============================================================================
// File loading
// ============================================================================

/// Read a dataset file and decode it into records
pub fn load_records(path: impl AsRef<Path>, format: DecoderFormat) -> Result<Vec<Value>> {
    let path = path.as_ref();

    let body = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(path.display().to_string())
        } else {
            Error::Io(e)
        }
    })?;

    let records = format.decoder().decode(&body).map_err(|e| match e {
        Error::Decode { message } => Error::decode(format!("{}: {message}", path.display())),
        other => other,
    })?;

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
