//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{AuditConfig, DatasetConfig};
use crate::decode::load_records;
use crate::error::{Error, Result};
use crate::quality::build_report;
use crate::schema::InferredSchema;
use crate::types::{Dataset, OutputFormat};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{error, info, warn};

/// Schema of one dataset, as emitted with `--format json`
#[derive(Debug, Serialize)]
struct SchemaOutput<'a> {
    dataset: &'a str,
    #[serde(flatten)]
    schema: &'a InferredSchema,
}

/// Dataset listing entry
#[derive(Debug, Serialize)]
struct DatasetStatus {
    name: String,
    path: String,
    exists: bool,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing results to stdout
    pub fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Run the CLI command, writing results to `out`
    pub fn run_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Schema { datasets } => self.schema(&config, datasets, out),
            Commands::Quality => self.quality(&config, out),
            Commands::Datasets => self.datasets(&config, out),
        }
    }

    /// Load configuration, applying CLI overrides
    fn load_config(&self) -> Result<AuditConfig> {
        let config = match &self.cli.config {
            Some(path) => AuditConfig::from_file(path)?,
            None => AuditConfig::default(),
        };

        Ok(match &self.cli.data_dir {
            Some(dir) => config.with_data_dir(dir),
            None => config,
        })
    }

    /// Load one dataset, logging and skipping it on failure
    fn load_dataset(config: &AuditConfig, dataset: &DatasetConfig) -> Option<Dataset> {
        let path = config.path_for(dataset);

        match load_records(&path, dataset.format) {
            Ok(records) => {
                info!("Loaded {} records for '{}'", records.len(), dataset.name);
                Some(Dataset::new(&dataset.name, records))
            }
            Err(Error::FileNotFound { .. }) => {
                warn!(
                    "{} file not found at {}, skipping",
                    dataset.name,
                    path.display()
                );
                None
            }
            Err(e) => {
                error!("Failed to load dataset '{}': {e}", dataset.name);
                None
            }
        }
    }

    /// Select datasets by name, or all when `names` is empty
    fn select<'a>(config: &'a AuditConfig, names: &[String]) -> Result<Vec<&'a DatasetConfig>> {
        if names.is_empty() {
            return Ok(config.datasets.iter().collect());
        }

        names
            .iter()
            .map(|name| {
                config
                    .dataset(name)
                    .ok_or_else(|| Error::config(format!("Unknown dataset: {name}")))
            })
            .collect()
    }

    /// Print inferred DDL per dataset
    fn schema<W: Write>(
        &self,
        config: &AuditConfig,
        names: &[String],
        out: &mut W,
    ) -> Result<()> {
        let inferencer = config.inferencer();
        let mut schemas = Vec::new();

        for dataset_config in Self::select(config, names)? {
            let Some(dataset) = Self::load_dataset(config, dataset_config) else {
                continue;
            };
            let schema = inferencer.infer(&dataset.records, &dataset.name)?;
            info!(
                "Inferred {} table(s) for '{}'",
                schema.nested.len() + 1,
                dataset.name
            );
            schemas.push((dataset.name, schema));
        }

        match self.cli.format {
            OutputFormat::Text => {
                for (_, schema) in &schemas {
                    writeln!(out, "{}", schema.to_sql())?;
                }
            }
            OutputFormat::Json => {
                let docs: Vec<SchemaOutput<'_>> = schemas
                    .iter()
                    .map(|(name, schema)| SchemaOutput {
                        dataset: name,
                        schema,
                    })
                    .collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&docs)?)?;
            }
        }

        Ok(())
    }

    /// Print the data-quality report
    fn quality<W: Write>(&self, config: &AuditConfig, out: &mut W) -> Result<()> {
        let datasets: Vec<Dataset> = config
            .datasets
            .iter()
            .filter_map(|d| Self::load_dataset(config, d))
            .collect();

        let report = build_report(&datasets, &config.id_field);

        match self.cli.format {
            OutputFormat::Text => write!(out, "{report}")?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
        }

        Ok(())
    }

    /// List configured datasets
    fn datasets<W: Write>(&self, config: &AuditConfig, out: &mut W) -> Result<()> {
        let statuses: Vec<DatasetStatus> = config
            .datasets
            .iter()
            .map(|d| {
                let path = config.path_for(d);
                DatasetStatus {
                    name: d.name.clone(),
                    exists: path.is_file(),
                    path: path.display().to_string(),
                }
            })
            .collect();

        match self.cli.format {
            OutputFormat::Text => {
                for s in &statuses {
                    let state = if s.exists { "found" } else { "missing" };
                    writeln!(out, "{:<12} {:<8} {}", s.name, state, s.path)?;
                }
            }
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&statuses)?)?;
            }
        }

        Ok(())
    }
}
