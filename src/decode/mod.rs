//! Record decoder module
//!
//! Supports: JSONL (one object per line) and JSON arrays
//!
//! # Overview
//!
//! Input datasets are read whole into memory and decoded into a list of
//! JSON object records. A malformed line fails the whole file.

mod decoders;
mod types;

pub use decoders::{load_records, JsonArrayDecoder, JsonlDecoder};
pub use types::{DecoderFormat, RecordDecoder};
