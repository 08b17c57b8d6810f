//! CLI commands and argument parsing

use crate::types::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Data-quality checks and schema inference for line-delimited JSON datasets
#[derive(Parser, Debug)]
#[command(name = "rewards-audit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the dataset files (overrides the config file)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print CREATE TABLE statements inferred from each dataset
    Schema {
        /// Only these datasets (repeatable, default = all configured)
        #[arg(long = "dataset")]
        datasets: Vec<String>,
    },

    /// Print the data-quality report
    Quality,

    /// List configured datasets and whether their files exist
    Datasets,
}
