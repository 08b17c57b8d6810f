//! Configuration types for an audit run
//!
//! Describes which datasets are read, where they live and how schema
//! inference is tuned. Loaded from YAML, or built from defaults.

use crate::decode::DecoderFormat;
use crate::error::{Error, Result, ResultExt};
use crate::schema::{
    is_valid_identifier, SchemaInferencer, DEFAULT_ID_FIELD, DEFAULT_SURROGATE_KEY,
    DEFAULT_VARCHAR_LENGTH,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete audit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Directory dataset files are resolved against
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Identifier field of every record
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Length of inferred string columns
    #[serde(default = "default_varchar_length")]
    pub varchar_length: u32,

    /// Surrogate key column of nested tables
    #[serde(default = "default_surrogate_key")]
    pub surrogate_key: String,

    /// Datasets to process, in order
    #[serde(default = "default_datasets")]
    pub datasets: Vec<DatasetConfig>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}

fn default_varchar_length() -> u32 {
    DEFAULT_VARCHAR_LENGTH
}

fn default_surrogate_key() -> String {
    DEFAULT_SURROGATE_KEY.to_string()
}

fn default_datasets() -> Vec<DatasetConfig> {
    vec![
        DatasetConfig::jsonl("receipts", "receipts.json"),
        DatasetConfig::jsonl("users", "users.json"),
        DatasetConfig::jsonl("brands", "brands.json"),
    ]
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            id_field: default_id_field(),
            varchar_length: default_varchar_length(),
            surrogate_key: default_surrogate_key(),
            datasets: default_datasets(),
        }
    }
}

// ============================================================================
// Dataset Config
// ============================================================================

/// One dataset: its root table name and file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Dataset name, also the root table name
    pub name: String,

    /// File name, relative to `data_dir` unless absolute
    pub file: PathBuf,

    /// File format
    #[serde(default)]
    pub format: DecoderFormat,
}

impl DatasetConfig {
    /// Create a JSONL dataset entry
    pub fn jsonl(name: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            format: DecoderFormat::Jsonl,
        }
    }
}

impl AuditConfig {
    /// Load a configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Load a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AuditConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the data directory
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.id_field.is_empty() {
            return Err(Error::config("id_field cannot be empty"));
        }
        if self.varchar_length == 0 {
            return Err(Error::config("varchar_length must be positive"));
        }
        if !is_valid_identifier(&self.surrogate_key) {
            return Err(Error::config(format!(
                "surrogate_key '{}' is not a valid column name",
                self.surrogate_key
            )));
        }
        if self.datasets.is_empty() {
            return Err(Error::config("At least one dataset must be configured"));
        }

        let mut names = HashSet::new();
        for dataset in &self.datasets {
            if !is_valid_identifier(&dataset.name) {
                return Err(Error::invalid_table_name(&dataset.name));
            }
            if !names.insert(dataset.name.as_str()) {
                return Err(Error::config(format!(
                    "Duplicate dataset name: {}",
                    dataset.name
                )));
            }
            if dataset.file.as_os_str().is_empty() {
                return Err(Error::config(format!(
                    "Dataset '{}' has an empty file path",
                    dataset.name
                )));
            }
        }

        Ok(())
    }

    /// Resolve a dataset's file against the data directory
    pub fn path_for(&self, dataset: &DatasetConfig) -> PathBuf {
        if dataset.file.is_absolute() {
            dataset.file.clone()
        } else {
            self.data_dir.join(&dataset.file)
        }
    }

    /// Find a dataset by name
    pub fn dataset(&self, name: &str) -> Option<&DatasetConfig> {
        self.datasets.iter().find(|d| d.name == name)
    }

    /// Build a schema inferencer with these settings
    pub fn inferencer(&self) -> SchemaInferencer {
        SchemaInferencer::new()
            .with_id_field(&self.id_field)
            .with_varchar_length(self.varchar_length)
            .with_surrogate_key(&self.surrogate_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuditConfig::default();
        assert_eq!(config.id_field, "_id");
        assert_eq!(config.varchar_length, 500);
        let names: Vec<&str> = config.datasets.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["receipts", "users", "brands"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_with_defaults() {
        let config = AuditConfig::from_yaml("data_dir: /data\n").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/data"));
        assert_eq!(config.datasets.len(), 3);
        assert_eq!(
            config.path_for(&config.datasets[0]),
            PathBuf::from("/data/receipts.json")
        );
    }

    #[test]
    fn test_from_yaml_custom_datasets() {
        let yaml = r"
id_field: uuid
varchar_length: 255
datasets:
  - name: events
    file: events.json
    format: json
  - name: logs
    file: /abs/logs.jsonl
";
        let config = AuditConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.id_field, "uuid");
        assert_eq!(config.datasets[0].format, DecoderFormat::Json);
        assert_eq!(config.datasets[1].format, DecoderFormat::Jsonl);
        assert_eq!(
            config.path_for(&config.datasets[1]),
            PathBuf::from("/abs/logs.jsonl")
        );
        assert!(config.dataset("events").is_some());
        assert!(config.dataset("missing").is_none());
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let yaml = "datasets:\n  - name: bad-name\n    file: x.json\n";
        assert!(matches!(
            AuditConfig::from_yaml(yaml).unwrap_err(),
            Error::InvalidTableName { .. }
        ));

        let yaml = "datasets:\n  - name: a\n    file: x.json\n  - name: a\n    file: y.json\n";
        assert!(AuditConfig::from_yaml(yaml)
            .unwrap_err()
            .to_string()
            .contains("Duplicate dataset name"));
    }

    #[test]
    fn test_validate_rejects_empty_dataset_list() {
        assert!(AuditConfig::from_yaml("datasets: []\n").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_length() {
        assert!(AuditConfig::from_yaml("varchar_length: 0\n").is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = AuditConfig::from_yaml("datasets: [").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
        assert!(err.to_string().starts_with("Failed to parse YAML"));
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = AuditConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Other(_)));
        assert!(err
            .to_string()
            .starts_with(&format!("Failed to read config file '{}': IO error", path.display())));
    }

    #[test]
    fn test_from_file_reads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.yaml");
        fs::write(&path, "id_field: uuid\n").unwrap();
        let config = AuditConfig::from_file(&path).unwrap();
        assert_eq!(config.id_field, "uuid");
    }

    #[test]
    fn test_inferencer_uses_settings() {
        let config = AuditConfig::from_yaml("varchar_length: 64\n").unwrap();
        let inferencer = config.inferencer();
        assert_eq!(
            inferencer.infer_sql_type(None),
            crate::schema::SqlType::Varchar(64)
        );
    }
}
