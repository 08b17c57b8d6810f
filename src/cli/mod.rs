//! CLI module
//!
//! Command-line interface for the audit.
//!
//! # Commands
//!
//! - `schema` - Print inferred `CREATE TABLE` statements
//! - `quality` - Print the data-quality report
//! - `datasets` - List configured datasets

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
