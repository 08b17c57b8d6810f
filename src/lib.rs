// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # rewards-audit
//!
//! Exploratory data-quality checks and relational schema inference for
//! line-delimited JSON datasets (brands, receipts, users).
//!
//! ## Features
//!
//! - **Schema Inference**: Main and nested `CREATE TABLE` statements from sparse records
//! - **Sample-Based Typing**: `INT`, `FLOAT`, `BOOLEAN`, `TIMESTAMP`, `VARCHAR(n)`
//! - **Data-Quality Checks**: Duplicates, missing values, join keys, price reconciliation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rewards_audit::decode::{load_records, DecoderFormat};
//! use rewards_audit::schema::SchemaInferencer;
//!
//! let records = load_records("receipts.json", DecoderFormat::Jsonl)?;
//! let schema = SchemaInferencer::new().infer(&records, "receipts")?;
//! println!("{}", schema.to_sql());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────────┐
//! │  config  │───▶│  decode  │───▶│    schema    │──▶ CREATE TABLE ...
//! └──────────┘    └──────────┘    ├──────────────┤
//!                                 │   quality    │──▶ report
//!                                 └──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and helpers
pub mod types;

/// Dataset file decoding
pub mod decode;

/// Relational schema inference
pub mod schema;

/// Data-quality checks
pub mod quality;

/// Run configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::AuditConfig;
pub use schema::{infer_schema, InferredSchema, SchemaInferencer, TableDefinition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
