//! Decoder types and traits

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format of a dataset file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderFormat {
    /// JSON Lines format (one JSON object per line)
    #[default]
    Jsonl,
    /// A single JSON array of objects
    Json,
}

impl DecoderFormat {
    /// Get the decoder for this format
    pub fn decoder(self) -> Box<dyn RecordDecoder> {
        match self {
            DecoderFormat::Jsonl => Box::new(super::JsonlDecoder::new()),
            DecoderFormat::Json => Box::new(super::JsonArrayDecoder::new()),
        }
    }
}

/// Trait for decoding file contents into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the body into a list of object records
    fn decode(&self, body: &str) -> Result<Vec<Value>>;
}
